use crate::artifacts::objects::commit::Commit;
use colored::Colorize;
use derive_new::new;
use std::fmt;

/// One commit as printed by `log`, `global-log` and friends
///
/// ```text
/// ===
/// commit <id>
/// Merge: <short-parent-1> <short-parent-2>
/// Date: Thu Jan 01 00:00:00 1970 +0000
/// <message>
///
/// ```
#[derive(new)]
pub struct LogEntry<'c> {
    commit: &'c Commit,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "===".yellow())?;
        writeln!(f, "{}", format!("commit {}", self.commit.oid()).yellow())?;

        if let [first, second, ..] = self.commit.parents() {
            writeln!(
                f,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }

        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}
