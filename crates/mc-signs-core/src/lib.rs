//! Per-viewer sign translation for outbound Java Edition packets.
//!
//! [`SignInterceptor`] rewrites sign text in packets on their way to a
//! client, choosing its handlers once from the running protocol version.
//! [`SignRefresher`] pushes freshly built sign packets to a viewer after a
//! language change. Neither touches the server's own world state.

pub mod builder;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod lines;
pub mod location;
pub mod refresh;
pub mod services;
pub mod type_cache;
pub mod world;

pub use builder::SignPacketBuilder;
pub use codec::SignTextCodec;
pub use config::SignsConfig;
pub use dispatch::{Registration, RewritePolicy, SignEra, SignHandler};
pub use error::SignError;
pub use handlers::{HandleOutcome, PacketEvent, SignInterceptor};
pub use lines::SignLines;
pub use location::SignLocation;
pub use refresh::{RefreshReport, SignRefresher};
pub use services::{FormatService, PacketSink, SignReader, TranslationLookup, Viewer};
pub use type_cache::{BlockEntityTypes, TypeCache};
pub use world::{SignReadRequest, WorldAccess, WorldBridge};
