//! Infrastructure layer: all `SeaORM` specifics live here.

pub mod storage;
