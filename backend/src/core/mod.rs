//! Core value handling shared by every layer

pub mod currency;
