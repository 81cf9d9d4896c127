//! Markdown table codec for monthly plan and fact files
//!
//! Files are a title followed by level-2 sections, each holding a pipe table:
//!
//! ```text
//! ## Планируемые расходы
//!
//! | Категория | Сумма (руб.) | Срок оплаты | Примечание |
//! |-----------|--------------|-------------|------------|
//! | Транспорт | 1 500        | 10.03.2025  |            |
//! | **Итого** | **1 500**    |             |            |
//! ```
//!
//! The codec reads such files into row records and edits them in place,
//! leaving every line it does not insert or remove byte-for-byte intact.

pub mod columns;
pub mod document;
pub mod headings;
pub mod ledger;
pub mod template;

pub use document::Document;
pub use headings::SectionKind;
pub use ledger::{LedgerDocument, RowSelector};
