//! # Data Access
//!
//! Owns the single SQLite connection and exposes one async function per
//! CRUD operation over the two tables:
//!
//! - `Messages(id, message)`: a chat-style message log, ids assigned on insert
//! - `estadistica(id, fecha_ingreso, hora_ingreso, pais, ciudad, tiempo, ruta, dispositivo)`:
//!   visit records keyed by a caller-supplied id
//!
//! Every operation returns a [`StoreResult`]; driver failures are logged here
//! and the HTTP layer decides what the client sees. All statements bind their
//! inputs as parameters.

mod errors;
mod estadisticas;
mod messages;
mod models;
mod pool;

pub use errors::{StoreError, StoreResult};
pub use models::{EstadisticaFields, FieldValue, NewEstadistica, Record};
pub use pool::{Store, StoreLocation, SEED_MESSAGE_COUNT};
