//! Defaults and knobs for a [`Migrator`](crate::Migrator) run.

/// Name of the history table used by [`Migrator::run`](crate::Migrator::run).
pub const DEFAULT_HISTORY_TABLE: &str = "migration_history";

/// What the execution loop does when it meets a file that already has a
/// history record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnApplied {
    /// Stop the run at the first applied file in sort order. Migrations are
    /// assumed to be applied as a gap-free ordered prefix.
    #[default]
    Stop,

    /// Skip applied files and keep looking for unapplied ones after them.
    Skip,
}

#[derive(Debug, Clone)]
pub struct MigratorConfig {
    pub history_table: String,
    pub on_applied: OnApplied,
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self {
            history_table: DEFAULT_HISTORY_TABLE.to_owned(),
            on_applied: OnApplied::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: MigratorConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history_table(mut self, table: impl Into<String>) -> Self {
        self.config.history_table = table.into();
        self
    }

    pub fn on_applied(mut self, on_applied: OnApplied) -> Self {
        self.config.on_applied = on_applied;
        self
    }

    pub fn build(self) -> MigratorConfig {
        self.config
    }
}
