//! Ports - Interfaces between the application and its collaborators

pub mod outbound;
