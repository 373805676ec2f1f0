// Item key classification. Every substring test on item keys lives here;
// the rest of the crate branches on TargetMetric / UnitClass.

const MEMORY_SIZE_MARKER: &str = "vm.memory.size";
const PERCENT_AVAILABLE_MARKER: &str = "pavailable";
const CPU_MARKER: &str = "cpu";
const UTILIZATION_MARKER: &str = "utilization";

/// The fixed allow list of item keys exported for every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetMetric {
    CpuUtil,
    CpuIdle,
    CpuIowait,
    CpuSystem,
    CpuUser,
    CpuSteal,
    CpuNum,
    MemoryUtilization,
    MemoryAvailable,
    MemoryPavailable,
    MemoryUsed,
    MemoryTotal,
}

impl TargetMetric {
    pub const ALL: [TargetMetric; 12] = [
        TargetMetric::CpuUtil,
        TargetMetric::CpuIdle,
        TargetMetric::CpuIowait,
        TargetMetric::CpuSystem,
        TargetMetric::CpuUser,
        TargetMetric::CpuSteal,
        TargetMetric::CpuNum,
        TargetMetric::MemoryUtilization,
        TargetMetric::MemoryAvailable,
        TargetMetric::MemoryPavailable,
        TargetMetric::MemoryUsed,
        TargetMetric::MemoryTotal,
    ];

    /// Exact Zabbix item key.
    pub fn key(self) -> &'static str {
        match self {
            TargetMetric::CpuUtil => "system.cpu.util",
            TargetMetric::CpuIdle => "system.cpu.util[,idle]",
            TargetMetric::CpuIowait => "system.cpu.util[,iowait]",
            TargetMetric::CpuSystem => "system.cpu.util[,system]",
            TargetMetric::CpuUser => "system.cpu.util[,user]",
            TargetMetric::CpuSteal => "system.cpu.util[,steal]",
            TargetMetric::CpuNum => "system.cpu.num",
            TargetMetric::MemoryUtilization => "vm.memory.utilization",
            TargetMetric::MemoryAvailable => "vm.memory.size[available]",
            TargetMetric::MemoryPavailable => "vm.memory.size[pavailable]",
            TargetMetric::MemoryUsed => "vm.memory.size[used]",
            TargetMetric::MemoryTotal => "vm.memory.size[total]",
        }
    }

    /// Exact match only; `system.cpu.util[,guest]` is not a target.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// All keys, for the item.get `filter`.
    pub fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.key()).collect()
    }

    pub fn unit_class(self) -> UnitClass {
        UnitClass::classify(self.key())
    }
}

/// How raw values of an item are scaled and labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
    /// Memory size in bytes; shown in GiB.
    Bytes,
    /// CPU, utilization and percent-available keys.
    Percent,
    /// Counts and anything unrecognized; shown as-is.
    Plain,
}

impl UnitClass {
    pub fn classify(key: &str) -> Self {
        let percent_available = key.contains(PERCENT_AVAILABLE_MARKER);
        if key.contains(MEMORY_SIZE_MARKER) && !percent_available {
            UnitClass::Bytes
        } else if key.to_lowercase().contains(CPU_MARKER)
            || key.contains(UTILIZATION_MARKER)
            || percent_available
        {
            UnitClass::Percent
        } else {
            UnitClass::Plain
        }
    }

    /// Unit column value.
    pub fn label(self) -> &'static str {
        match self {
            UnitClass::Bytes => "GB",
            UnitClass::Percent => "%",
            UnitClass::Plain => "",
        }
    }
}
