//! # Web Handlers for the Campland Reservation Backend
//!
//! This crate provides the HTTP handlers and database-backed services that
//! bridge the web surface and the booking core.

/// Request/response types and the API error for booking operations
mod booking_types;
pub use booking_types::*;

/// Request/response types for plot and price management
mod plot_types;
pub use plot_types::*;

/// Service for search, intake, calendars and booking management
mod booking_service;
pub use booking_service::*;

/// Services for plot records and global price settings
mod plot_service;
pub use plot_service::*;

/// Guest-facing booking and search handlers
mod booking_handlers;
pub use booking_handlers::*;

/// Guest-facing plot browsing handlers
mod plot_handlers;
pub use plot_handlers::*;

/// Staff-facing management and analytics handlers
mod admin_handlers;
pub use admin_handlers::*;
