//! Application services - Use case implementations
//!
//! Services accept port dependencies and drive the character sheet
//! aggregate; they never talk to a concrete store themselves.

pub mod character_sheet_service;

pub use character_sheet_service::{
    CharacterSheetService, CharacterSheetServiceImpl, SheetServiceError,
};
