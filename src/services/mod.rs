// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod password;
pub mod pdf;
pub mod portfolio;

pub use pdf::{LineStyle, PdfLine};
pub use portfolio::PortfolioEntry;
