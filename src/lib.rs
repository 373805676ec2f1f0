// Library for tests to access modules

pub mod aggregation;
pub mod config;
pub mod export;
pub mod metric_kind;
pub mod models;
pub mod monitoring;
pub mod report;
pub mod scheduler;
pub mod selector;
pub mod sink;
pub mod units;
pub mod version;
pub mod zabbix_repo;
