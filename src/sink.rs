// Report sink: host CSV tables and the group side index, one directory per client.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::models::{GroupIndex, HostReport, REPORT_HEADER};

/// File name of the group side index inside a container directory.
pub const GROUP_INDEX_FILE: &str = "_hostgroups_info.json";

#[allow(async_fn_in_trait)]
pub trait ReportSink {
    async fn write_host_report(&self, report: &HostReport) -> anyhow::Result<()>;
    async fn write_group_index(&self, index: &GroupIndex) -> anyhow::Result<()>;
}

/// Writes `<output_dir>/<container>/<host>.csv` and the group index JSON.
pub struct FsReportSink {
    dir: PathBuf,
}

impl FsReportSink {
    /// Create the container directory if missing.
    pub async fn open(output_dir: &str, container: &str) -> anyhow::Result<Self> {
        let dir = Path::new(output_dir).join(container);
        if tokio::fs::try_exists(&dir).await? {
            debug!(dir = %dir.display(), "report container exists");
        } else {
            tokio::fs::create_dir_all(&dir).await?;
            info!(dir = %dir.display(), "report container created");
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn host_report_path(&self, host: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", file_stem(host)))
    }
}

impl ReportSink for FsReportSink {
    async fn write_host_report(&self, report: &HostReport) -> anyhow::Result<()> {
        let path = self.host_report_path(&report.host);
        tokio::fs::write(&path, render_csv(report)).await?;
        debug!(path = %path.display(), rows = report.rows.len(), "host report written");
        Ok(())
    }

    async fn write_group_index(&self, index: &GroupIndex) -> anyhow::Result<()> {
        let path = self.dir.join(GROUP_INDEX_FILE);
        tokio::fs::write(&path, serde_json::to_string_pretty(index)?).await?;
        info!(path = %path.display(), groups = index.groups.len(), "host groups info saved");
        Ok(())
    }
}

/// Header row plus one line per metric.
pub fn render_csv(report: &HostReport) -> String {
    let mut out = REPORT_HEADER.join(",");
    out.push_str("\r\n");
    for row in &report.rows {
        let _ = write!(
            out,
            "{},{},{},{},{},{},{}\r\n",
            csv_field(&row.metric),
            csv_field(&row.min),
            csv_field(&row.max),
            csv_field(&row.avg),
            row.samples,
            csv_field(&row.host_groups),
            csv_field(&row.unit),
        );
    }
    out
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Host names may contain path separators; keep the file inside the container.
fn file_stem(host: &str) -> String {
    host.chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}
