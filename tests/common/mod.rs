//! Shared fixtures: snapshot archives built on the fly.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Configuration with two virtual servers.
pub const CONFIG_A: &str = r"ltm pool /Common/web_pool {
    members {
        /Common/10.0.0.10:80 {
            address 10.0.0.10
        }
    }
}
ltm virtual /Common/web_vs {
    destination /Common/10.0.0.1:80
    ip-protocol tcp
    pool /Common/web_pool
}
ltm virtual /Common/api_vs {
    destination /Common/10.0.0.2:443
    pool /Common/api_pool
    rules /Common/redirect
}
";

/// `CONFIG_A` with a changed pool, a dropped rule and a new virtual server.
pub const CONFIG_B: &str = r"ltm virtual /Common/web_vs {
    destination /Common/10.0.0.1:80
    ip-protocol tcp
    pool /Common/web_pool_v2
}
ltm virtual /Common/api_vs {
    destination /Common/10.0.0.2:443
    pool /Common/api_pool
}
ltm virtual /Common/admin_vs {
    destination /Common/10.0.0.3:8443
}
";

/// Discrepancy lines expected when comparing `CONFIG_A` with `CONFIG_B`.
pub const EXPECTED_A_VS_B: &str = "\
Virtual server '/Common/admin_vs' is missing in the first configuration.
Attribute 'rules' in virtual server '/Common/api_vs' is missing in the second configuration.
Attribute 'pool' in virtual server '/Common/web_vs' differs: '/Common/web_pool' vs '/Common/web_pool_v2'.
";

/// Writes a gzip-compressed tar holding `config` at `config/bigip.conf`
/// next to a few unrelated files.
pub fn snapshot(dir: &Path, name: &str, config: &str) -> PathBuf {
    let path = dir.join(name);
    write_archive(
        &path,
        &[
            ("config/bigip_base.conf", "net vlan /Common/internal {\n    tag 4094\n}\n"),
            ("config/bigip.conf", config),
            ("var/log/ltm", "Jan  1 00:00:00 info mcpd started\n"),
        ],
    );
    path
}

/// Writes a gzip-compressed tar holding `files`.
pub fn write_archive(path: &Path, files: &[(&str, &str)]) {
    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, content.as_bytes()).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
}

/// Lists `results-*.txt` files in `dir`.
pub fn results_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("results-") && name.ends_with(".txt"))
        })
        .collect();
    files.sort();
    files
}
