// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Directory-level distribute / recover on real files.

use std::fs;
use std::path::Path;

use bmp_sss::sss::{count_regular_files, default_shadow_count, shadow_file_name};
use bmp_sss::{distribute_dir, recover_dir, Bitmap, SchemeParams, SssError, DEFAULT_SEED};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn write_random_bmp(path: &Path, width: u32, height: i32, seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut bmp = Bitmap::new(width, height, 0, 0).unwrap();
    rng.fill(bmp.pixels_mut());
    fs::write(path, bmp.to_bytes()).unwrap();
}

fn write_product_secret(path: &Path) -> Bitmap {
    let mut bmp = Bitmap::new(8, 8, 0, 0).unwrap();
    for (i, p) in bmp.pixels_mut().iter_mut().enumerate() {
        *p = ((i % 8) * (i / 8)) as u8;
    }
    fs::write(path, bmp.to_bytes()).unwrap();
    bmp
}

#[test]
fn distribute_then_recover() {
    let work = tempfile::tempdir().unwrap();
    let covers = work.path().join("covers");
    let shadows = work.path().join("shadows");
    fs::create_dir(&covers).unwrap();
    for (i, name) in ["c.bmp", "a.bmp", "b.bmp", "d.bmp"].iter().enumerate() {
        write_random_bmp(&covers.join(name), 16, 16, i as u64);
    }
    let secret_path = work.path().join("secret.bmp");
    let secret = write_product_secret(&secret_path);
    let before: Vec<Vec<u8>> = ["a.bmp", "b.bmp", "c.bmp"]
        .iter()
        .map(|n| fs::read(covers.join(n)).unwrap())
        .collect();

    let params = SchemeParams::new(2, 3).unwrap();
    let written = distribute_dir(&secret_path, &covers, &shadows, params, DEFAULT_SEED).unwrap();
    assert_eq!(written.len(), 3);
    for (i, path) in written.iter().enumerate() {
        assert_eq!(path, &shadows.join(shadow_file_name(i as u16 + 1)));
    }

    // Covers are left alone; the carriers are built from the first three by name.
    for (name, original) in ["a.bmp", "b.bmp", "c.bmp"].iter().zip(&before) {
        assert_eq!(&fs::read(covers.join(name)).unwrap(), original);
    }
    let carrier = Bitmap::from_bytes(&fs::read(&written[1]).unwrap()).unwrap();
    let cover_b = Bitmap::from_bytes(&before[1]).unwrap();
    assert_eq!(carrier.shadow_number(), 2);
    assert_eq!(carrier.key(), DEFAULT_SEED);
    for (a, b) in cover_b.pixels().iter().zip(carrier.pixels()) {
        assert_eq!(a >> 1, b >> 1);
    }

    // Any two carriers are enough.
    fs::remove_file(&written[0]).unwrap();
    let output = work.path().join("revealed.bmp");
    recover_dir(&shadows, &output, 8, 8, 2).unwrap();
    let revealed = Bitmap::from_bytes(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(revealed.pixels(), secret.pixels());
    assert_eq!((revealed.width(), revealed.height()), (8, 8));
}

#[test]
fn secret_in_cover_dir_is_not_a_cover() {
    let dir = tempfile::tempdir().unwrap();
    // With k = 8 the 16x16 secret is large enough to pass the cover check,
    // and its name sorts first.
    let secret_path = dir.path().join("0-secret.bmp");
    write_random_bmp(&secret_path, 16, 16, 9);
    for i in 0..8u64 {
        write_random_bmp(&dir.path().join(format!("x{i}.bmp")), 16, 16, 20 + i);
    }
    assert_eq!(count_regular_files(dir.path(), &[]).unwrap(), 9);
    assert_eq!(default_shadow_count(&secret_path, dir.path()).unwrap(), 8);

    let out = dir.path().join("out");
    let params = SchemeParams::new(8, 8).unwrap();
    let written = distribute_dir(&secret_path, dir.path(), &out, params, DEFAULT_SEED).unwrap();
    assert_eq!(written.len(), 8);

    let first_cover = Bitmap::from_bytes(&fs::read(dir.path().join("x0.bmp")).unwrap()).unwrap();
    let first_carrier = Bitmap::from_bytes(&fs::read(&written[0]).unwrap()).unwrap();
    for (a, b) in first_cover.pixels().iter().zip(first_carrier.pixels()) {
        assert_eq!(a >> 1, b >> 1);
    }
}

#[test]
fn default_count_with_secret_among_covers() {
    let dir = tempfile::tempdir().unwrap();
    let secret_path = dir.path().join("secret.bmp");
    let secret = write_product_secret(&secret_path);
    for (i, name) in ["a.bmp", "b.bmp", "c.bmp"].iter().enumerate() {
        write_random_bmp(&dir.path().join(name), 16, 16, 40 + i as u64);
    }

    // Three covers next to the secret: the default n is 3, not 4.
    let n = default_shadow_count(&secret_path, dir.path()).unwrap();
    assert_eq!(n, 3);

    let out = dir.path().join("out");
    let params = SchemeParams::new(2, n).unwrap();
    let written = distribute_dir(&secret_path, dir.path(), &out, params, DEFAULT_SEED).unwrap();
    assert_eq!(written.len(), 3);

    let output = dir.path().join("revealed.bmp");
    recover_dir(&out, &output, 8, 8, 2).unwrap();
    let revealed = Bitmap::from_bytes(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(revealed.pixels(), secret.pixels());
}

#[test]
fn not_enough_covers() {
    let dir = tempfile::tempdir().unwrap();
    let secret_path = dir.path().join("secret.bmp");
    write_product_secret(&secret_path);
    let covers = dir.path().join("covers");
    fs::create_dir(&covers).unwrap();
    write_random_bmp(&covers.join("big.bmp"), 16, 16, 1);
    write_random_bmp(&covers.join("small.bmp"), 8, 8, 2);
    fs::write(covers.join("notes.txt"), "hello").unwrap();

    let params = SchemeParams::new(2, 3).unwrap();
    let err = distribute_dir(&secret_path, &covers, dir.path(), params, DEFAULT_SEED).unwrap_err();
    assert!(
        matches!(
            err,
            SssError::NotEnoughCandidates {
                found: 1,
                needed: 3,
            }
        ),
        "got {err:?}"
    );
    assert!(!dir.path().join(shadow_file_name(1)).exists());
}

#[test]
fn plain_covers_are_not_carriers() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.bmp", "b.bmp"] {
        write_random_bmp(&dir.path().join(name), 16, 16, 3);
    }
    let err = recover_dir(dir.path(), &dir.path().join("out.bmp"), 8, 8, 2).unwrap_err();
    assert!(
        matches!(
            err,
            SssError::NotEnoughCandidates {
                found: 0,
                needed: 2,
            }
        ),
        "got {err:?}"
    );
}
