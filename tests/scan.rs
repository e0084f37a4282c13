//! End-to-end pipeline tests over the public API.

use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;

use bitcoin::address::{Address, NetworkUnchecked};
use bitcoin::secp256k1::Secp256k1;
use chrono::DateTime;
use rand::SeedableRng;
use rand::rngs::StdRng;

use keysweep::io::{FileSink, load_targets};
use keysweep::matching::MatchSink;
use keysweep::partition::{PrefixSampler, compose};
use keysweep::search::scan_suffix_range;
use keysweep::{MatchEngine, MatchPolicy, PrivateScalar, derive_all};

fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("keysweep-it-{}-{}", std::process::id(), name));
    path
}

#[test]
fn every_bundle_entry_is_syntactically_valid() {
    let secp = Secp256k1::new();
    let sampler = PrefixSampler::new();
    let mut rng = StdRng::seed_from_u64(11);
    let prefix = sampler.sample(&mut rng);

    for suffix in [0u16, 1, 0x7fff, u16::MAX] {
        let scalar = PrivateScalar::from_bytes(compose(&prefix, suffix)).unwrap();
        let bundle = derive_all(&secp, &scalar).unwrap();
        assert_eq!(bundle.len(), 11);

        for record in &bundle {
            let addr = &record.address;
            if let Some(hexpart) = addr.strip_prefix("0x") {
                assert_eq!(hexpart.len(), 40, "{}", record.label);
                assert!(hexpart.chars().all(|c| c.is_ascii_hexdigit()));
            } else if addr.starts_with("bc1") {
                // Parsing validates the Bech32/Bech32m checksum.
                Address::<NetworkUnchecked>::from_str(addr)
                    .unwrap_or_else(|e| panic!("{}: {e}", record.label));
            } else {
                // Parsing validates the Base58Check checksum.
                let decoded = bitcoin::base58::decode_check(addr)
                    .unwrap_or_else(|e| panic!("{}: {e}", record.label));
                assert_eq!(decoded.len(), 21, "{}", record.label);
            }
        }
    }
}

#[test]
fn scan_writes_a_parseable_match_line() {
    let secp = Secp256k1::new();
    let sampler = PrefixSampler::new();
    let mut rng = StdRng::seed_from_u64(12);
    let prefix = sampler.sample(&mut rng);

    // Target the 4-char prefix of one address from suffix 3's bundle, the
    // way a real target list under the prefix policy would carry it.
    let needle_scalar = PrivateScalar::from_bytes(compose(&prefix, 3)).unwrap();
    let needle = derive_all(&secp, &needle_scalar).unwrap()[0].address.clone();

    let targets_path = temp_path("targets.txt");
    std::fs::write(
        &targets_path,
        format!("# test targets\n{}\n", &needle[..4]),
    )
    .unwrap();
    let targets = load_targets(&targets_path).unwrap();
    std::fs::remove_file(&targets_path).unwrap();
    let engine = MatchEngine::new(MatchPolicy::default(), &targets);

    let output_path = temp_path("output.txt");
    let _ = std::fs::remove_file(&output_path);
    let cancel = AtomicBool::new(false);
    {
        let mut sink = FileSink::open(&output_path).unwrap();
        let guard = Mutex::new(&mut sink as &mut dyn MatchSink);
        let stats = scan_suffix_range(&secp, &engine, prefix, 0..=10, 0, &guard, &cancel).unwrap();
        assert_eq!(stats.scanned, 11);
        assert!(stats.matched >= 1);
    }

    let contents = std::fs::read_to_string(&output_path).unwrap();
    std::fs::remove_file(&output_path).unwrap();

    let needle_line = contents
        .lines()
        .find(|l| l.contains(&needle))
        .expect("needle address must be recorded");
    let fields: Vec<_> = needle_line.split(' ').collect();
    assert_eq!(fields.len(), 3);
    DateTime::parse_from_rfc3339(fields[0]).expect("ISO-8601 timestamp");
    assert_eq!(fields[1], needle);
    assert_eq!(fields[2], needle_scalar.to_hex());
}
