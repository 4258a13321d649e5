pub mod collect;
pub mod update;
