//! Proactive sign refresh after a viewer changes language.
//!
//! Walks every known sign, formats it for the viewer and sends one
//! synthetic update packet per placement, without waiting for chunks to be
//! resent.

use std::sync::Arc;

use tracing::{debug, error};

use crate::builder::SignPacketBuilder;
use crate::catalog::{LanguageSign, SignCatalog};
use crate::lines::SignLines;
use crate::location::SignLocation;
use crate::services::{FormatService, PacketSink, SignReader, Viewer};

/// Counts from one refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct SignRefresher {
    builder: SignPacketBuilder,
    catalog: Arc<dyn SignCatalog>,
    formatter: Arc<dyn FormatService>,
    world: Arc<dyn SignReader>,
    sink: Arc<dyn PacketSink>,
    main_language: String,
    /// Backend name to filter locations by, when running behind a proxy.
    backend: Option<String>,
}

impl SignRefresher {
    pub fn new(
        builder: SignPacketBuilder,
        catalog: Arc<dyn SignCatalog>,
        formatter: Arc<dyn FormatService>,
        world: Arc<dyn SignReader>,
        sink: Arc<dyn PacketSink>,
        main_language: impl Into<String>,
    ) -> Self {
        Self {
            builder,
            catalog,
            formatter,
            world,
            sink,
            main_language: main_language.into(),
            backend: None,
        }
    }

    /// Only refresh locations tagged with this backend (or untagged), when
    /// the catalog's storage is shared between backends.
    pub fn with_backend(mut self, bungeecord: bool, server_name: impl Into<String>) -> Self {
        self.backend = bungeecord.then(|| server_name.into());
        self
    }

    pub fn refresh_signs_for(&self, viewer: &Viewer) -> RefreshReport {
        let filter = self.backend.as_deref().filter(|_| self.catalog.is_shared());
        let mut report = RefreshReport::default();

        for collection in self.catalog.collections() {
            for sign in collection.signs() {
                self.refresh_sign(sign, viewer, filter, &mut report);
            }
        }

        debug!(
            "Refreshed signs for {viewer}: {} sent, {} failed",
            report.sent, report.failed
        );
        report
    }

    fn refresh_sign(
        &self,
        sign: &LanguageSign,
        viewer: &Viewer,
        filter: Option<&str>,
        report: &mut RefreshReport,
    ) {
        let Some(locations) = &sign.locations else {
            return;
        };
        let Some(lines) = sign
            .lines_for(&viewer.language)
            .or_else(|| sign.lines_for(&self.main_language))
        else {
            return;
        };

        for location in locations
            .iter()
            .filter(|loc| filter.is_none_or(|server| loc.owned_by(server)))
        {
            let fallback = || self.world.read_sign(location);
            let formatted = self.formatter.format_lines(&viewer.language, lines, &fallback);
            if self.send(viewer, location, &formatted) {
                report.sent += 1;
            } else {
                report.failed += 1;
            }
        }
    }

    fn send(&self, viewer: &Viewer, location: &SignLocation, lines: &SignLines) -> bool {
        let result = self
            .builder
            .build(location, lines)
            .and_then(|packet| self.sink.send_packet(viewer, packet));
        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to send sign update packet for {location}: {e}");
                false
            }
        }
    }
}
