use super::DesignerState;
use crate::export::{
    build_report, guest_rows, vector_drawing, write_rows, Report, ReportInput, ReportOptions,
    VectorDrawing,
};
use venuekit_core::{ExportError, Scope};

impl DesignerState {
    /// Guest rows for both scopes, using the configured delimiter unless
    /// one is given.
    pub fn export_guest_rows(&self, delimiter: Option<char>) -> Result<String, ExportError> {
        let delimiter = delimiter.unwrap_or(self.export_settings.delimiter);
        let rows = guest_rows(
            &self.guests,
            self.committed_snapshot(Scope::Ceremony),
            self.committed_snapshot(Scope::Banquet),
        );
        let out = write_rows(&rows, delimiter)?;
        tracing::debug!("Exported {} guest rows", rows.len());
        Ok(out)
    }

    pub fn vector_drawing(&self, scope: Scope) -> VectorDrawing {
        vector_drawing(self.committed_snapshot(scope))
    }

    /// Builds the setup report from the committed layouts. `None` uses the
    /// configured export settings.
    pub fn build_report(&self, options: Option<ReportOptions>) -> Result<Report, ExportError> {
        let options = options.unwrap_or_else(|| ReportOptions::from(&self.export_settings));
        let ceremony_conflicts = self.conflicts_in(Scope::Ceremony);
        let banquet_conflicts = self.conflicts_in(Scope::Banquet);
        let input = ReportInput {
            ceremony: self.committed_snapshot(Scope::Ceremony),
            banquet: self.committed_snapshot(Scope::Banquet),
            guests: &self.guests,
            ceremony_conflicts: &ceremony_conflicts,
            banquet_conflicts: &banquet_conflicts,
        };
        build_report(&input, &options)
    }
}
