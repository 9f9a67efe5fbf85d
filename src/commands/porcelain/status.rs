use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_report::StatusReport;

impl Repository {
    pub fn status(&self) -> crate::errors::Result<StatusReport> {
        let branches = self.branches()?;
        let head = self.head_commit()?;
        let workspace = Inspector::new(self.workspace()).scan_workspace()?;

        Ok(StatusReport::new(
            branches,
            head.snapshot(),
            self.index().tree(),
            &workspace,
        ))
    }
}
