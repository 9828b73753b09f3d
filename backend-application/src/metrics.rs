use std::sync::atomic::{AtomicU64, Ordering};

use crate::commands::link_commands::LinkSummary;

#[derive(Debug, Default)]
pub struct Metrics {
    imports: AtomicU64,
    imported_matches: AtomicU64,
    skipped_rows: AtomicU64,
    import_errors: AtomicU64,
    link_passes: AtomicU64,
    links: AtomicU64,
    heroes_received: AtomicU64,
    heroes_shared: AtomicU64,
}

impl Metrics {
    pub fn record_import(&self, match_count: usize, skipped: usize) {
        self.imports.fetch_add(1, Ordering::Relaxed);
        self.imported_matches
            .fetch_add(match_count as u64, Ordering::Relaxed);
        self.skipped_rows.fetch_add(skipped as u64, Ordering::Relaxed);
    }

    pub fn record_import_error(&self) {
        self.import_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_link_pass(&self, summary: &LinkSummary) {
        self.link_passes.fetch_add(1, Ordering::Relaxed);
        self.links.fetch_add(summary.links as u64, Ordering::Relaxed);
        self.heroes_received
            .fetch_add(summary.heroes_received as u64, Ordering::Relaxed);
        self.heroes_shared
            .fetch_add(summary.heroes_shared as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let imports = self.imports.load(Ordering::Relaxed);
        let imported = self.imported_matches.load(Ordering::Relaxed);
        let skipped = self.skipped_rows.load(Ordering::Relaxed);
        let errors = self.import_errors.load(Ordering::Relaxed);
        let passes = self.link_passes.load(Ordering::Relaxed);
        let links = self.links.load(Ordering::Relaxed);
        let received = self.heroes_received.load(Ordering::Relaxed);
        let shared = self.heroes_shared.load(Ordering::Relaxed);

        format!(
            "# TYPE matchbook_imports_total counter\n\
matchbook_imports_total {}\n\
# TYPE matchbook_imported_matches_total counter\n\
matchbook_imported_matches_total {}\n\
# TYPE matchbook_skipped_rows_total counter\n\
matchbook_skipped_rows_total {}\n\
# TYPE matchbook_import_errors_total counter\n\
matchbook_import_errors_total {}\n\
# TYPE matchbook_link_passes_total counter\n\
matchbook_link_passes_total {}\n\
# TYPE matchbook_links_total counter\n\
matchbook_links_total {}\n\
# TYPE matchbook_heroes_received_total counter\n\
matchbook_heroes_received_total {}\n\
# TYPE matchbook_heroes_shared_total counter\n\
matchbook_heroes_shared_total {}\n",
            imports, imported, skipped, errors, passes, links, received, shared
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counters_after_recording() {
        let metrics = Metrics::default();
        metrics.record_import(3, 1);
        metrics.record_link_pass(&LinkSummary {
            links: 2,
            heroes_received: 1,
            heroes_shared: 1,
        });
        let text = metrics.render_prometheus();
        assert!(text.contains("matchbook_imported_matches_total 3\n"));
        assert!(text.contains("matchbook_skipped_rows_total 1\n"));
        assert!(text.contains("matchbook_links_total 2\n"));
    }
}
