// Domain models (Zabbix wire records + report output)

mod directory;
mod item;
mod report;
mod serde_num;
mod summary;
mod trend;

pub use directory::{GroupRef, Host, HostGroup};
pub use item::{MonitoredItem, TargetItem, ValueKind};
pub use report::{
    GroupEntry, GroupIndex, HostReport, REPORT_HEADER, ReportRow, ReportWindow, RunSummary,
};
pub use summary::{ItemOutcome, MetricSummary, SummarySource};
pub use trend::{RawSample, RollupBucket};
