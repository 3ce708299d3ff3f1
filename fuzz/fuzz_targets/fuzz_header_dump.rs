#![no_main]

use libfuzzer_sys::fuzz_target;
use repodata_tools::header::HeaderDump;
use repodata_tools::normalize::{package_from_header, ExtractOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(header) = HeaderDump::from_str_auto(s).and_then(|dump| dump.to_header()) {
            let _ = package_from_header(&header, &ExtractOptions::default());
        }
    }
});
