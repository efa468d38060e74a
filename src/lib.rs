//! PostgreSQL schema differencing and migration SQL generator.
//!
//! This crate is the core described in `SPEC_FULL.md`: given two
//! [`catalog::Catalog`] values (an "old" and a "new" snapshot of a Postgres
//! schema), it computes the structural difference and emits an ordered,
//! dependency-safe stream of DDL statements that would carry a database from
//! the old state to the new one.
//!
//! Building a `Catalog` — parsing DDL text, inspecting a live database — is
//! out of scope; callers hand in two already-built catalogs. This crate has
//! no CLI, no file I/O, and no database connection of its own. See
//! [`pipeline`] for the three entry points ("Diff", "CollectMigrationSQL",
//! "GenerateDumpSQL") that tie the differ, orderer, and emitter together.

pub mod catalog;
pub mod diff;
pub mod pipeline;
pub mod render;
