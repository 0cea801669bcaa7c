//! Business logic that spans more than one repository.

pub mod orders;
