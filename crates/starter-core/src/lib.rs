pub mod decode;
pub mod employee;
pub mod error;
pub mod invoice;
pub mod selector;

pub use decode::{decode_barcode, decode_qrcode};
pub use employee::{EmployeeConnection, ProbabilityGroup, ProbabilityRecord, SelectedEntry};
pub use error::DecodeError;
pub use invoice::{Barcode, CodeKind, EncodedCode, Invoice, InvoiceDetail, QrCode};
pub use selector::{RandomSource, draw, select_employees, shuffle};
