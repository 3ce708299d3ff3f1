#![no_main]

use libfuzzer_sys::fuzz_target;
use repodata_tools::header::HeaderBlob;
use repodata_tools::model::RecordDocument;
use repodata_tools::normalize::{package_from_header, ExtractOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(blob) = HeaderBlob::parse(data) {
        let record = package_from_header(&blob, &ExtractOptions::default());
        let _ = RecordDocument::from(&record);
    }
});
