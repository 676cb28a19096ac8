//! Domain layer - Stat schemas and validated output blocks, no I/O
//!
//! This layer contains:
//! - Value Objects: schema tables, bonus types, subject kinds
//! - Entities: StatBlock and EquipmentBlock, the validated pipeline outputs

pub mod entities;
pub mod value_objects;
