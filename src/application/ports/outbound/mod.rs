//! Outbound ports - Interfaces that the application requires from external systems

mod character_store_port;

#[cfg(test)]
pub use character_store_port::MockCharacterStorePort;
pub use character_store_port::{CharacterStorePort, StoreError};
