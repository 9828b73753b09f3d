// Domain services: pure parsing, fingerprinting and pairing

pub mod csv_parser;
pub mod fingerprint;
pub mod line_classifier;
pub mod pairing;
pub mod paste_parser;

pub use csv_parser::{parse_csv, split_csv_line, CsvImport};
pub use fingerprint::Fingerprint;
pub use line_classifier::{classify_line, normalized_lines, LineKind};
pub use pairing::FingerprintIndex;
pub use paste_parser::{parse_match_row, parse_paste, parse_single_event, PasteImport};
