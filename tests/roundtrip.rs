extern crate iconpack;

use iconpack::{ContainerFormat, DecodedContainer, Diagnostic, ExportOptions, IconElement,
               IconFamily, IconPack, IconType, OSType, PixelBuffer, PixelFormat, Platform,
               ScaleAlgorithm, Target};

/// A square image with a color gradient in each channel.
fn gradient(size: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            data.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
        }
    }
    PixelBuffer::from_data(PixelFormat::RGBA, size, size, data).unwrap()
}

fn windows_pack_with_256() -> IconPack {
    let png = gradient(256).to_png().unwrap();
    let mut pack = IconPack::new(Platform::Windows);
    let report = pack.load_bytes(&png).unwrap();
    assert_eq!(report.loaded, 1);
    pack
}

fn encode(pack: &IconPack, format: ContainerFormat, export_text: bool) -> Vec<u8> {
    pack.encode(format, &ExportOptions { export_text })
        .unwrap()
        .bytes
        .expect("nothing encoded")
}

#[test]
fn every_platform_binds_its_scheme() {
    for &platform in Platform::ALL.iter() {
        let pack = IconPack::new(platform);
        assert_eq!(pack.sizes(), platform.sizes());
        assert_eq!(pack.count_valid(), 0);
        for entry in pack.entries() {
            assert!(!entry.is_valid());
            assert_eq!(entry.pixels(), &PixelBuffer::placeholder(entry.size()));
        }
    }
}

#[test]
fn load_png_fills_matching_slot() {
    let pack = windows_pack_with_256();
    assert_eq!(pack.count_valid(), 1);
    assert!(pack.entry(0).unwrap().is_valid());
    assert_eq!(pack.entry(0).unwrap().pixels(), &gradient(256));
}

#[test]
fn generate_missing_fills_all_slots() {
    let mut pack = windows_pack_with_256();
    let generated = pack.generate_missing(Target::All, ScaleAlgorithm::Nearest).unwrap();
    assert_eq!(generated, 7);
    assert_eq!(pack.count_valid(), 8);
    let source = gradient(256);
    for entry in pack.entries() {
        let expected = iconpack::resample(&source, entry.size(), ScaleAlgorithm::Nearest)
            .unwrap();
        assert_eq!(entry.pixels(), &expected);
    }
}

#[test]
fn generate_missing_is_idempotent() {
    let mut pack = windows_pack_with_256();
    pack.generate_missing(Target::All, ScaleAlgorithm::Smooth).unwrap();
    let once = pack.clone();
    assert_eq!(pack.generate_missing(Target::All, ScaleAlgorithm::Smooth).unwrap(), 0);
    assert_eq!(pack, once);
}

#[test]
fn ico_round_trip_is_lossless() {
    let mut pack = windows_pack_with_256();
    pack.generate_missing(Target::All, ScaleAlgorithm::Nearest).unwrap();
    let bytes = encode(&pack, ContainerFormat::Ico, false);
    assert_eq!(&bytes[0..6], &[0, 0, 1, 0, 8, 0]);
    // A 256 pixel entry is stored with a zero width byte.
    assert_eq!(bytes[6], 0);
    let mut reloaded = IconPack::new(Platform::Windows);
    let report = reloaded.load_bytes(&bytes).unwrap();
    assert_eq!(report.loaded, 8);
    assert!(report.diagnostics.is_empty());
    assert_eq!(reloaded, pack);
}

#[test]
fn icns_round_trip_is_lossless() {
    let mut pack = IconPack::new(Platform::MacOS);
    pack.load_bytes(&gradient(256).to_png().unwrap()).unwrap();
    pack.generate_missing(Target::All, ScaleAlgorithm::Smooth).unwrap();
    assert_eq!(pack.count_valid(), 8);
    let export = pack.encode(ContainerFormat::Icns, &ExportOptions::default()).unwrap();
    assert!(export.diagnostics.is_empty());
    let bytes = export.bytes.unwrap();
    assert_eq!(&bytes[0..4], b"icns");
    assert_eq!(&bytes[8..12], b"ic10");
    let mut reloaded = IconPack::new(Platform::MacOS);
    let report = reloaded.load_bytes(&bytes).unwrap();
    assert_eq!(report.loaded, 8);
    assert_eq!(reloaded, pack);
}

#[test]
fn icns_export_skips_sizes_without_type() {
    let mut pack = IconPack::new(Platform::Favicon);
    pack.generate_from(&gradient(256), Target::All, ScaleAlgorithm::Nearest).unwrap();
    let export = pack.encode(ContainerFormat::Icns, &ExportOptions::default()).unwrap();
    let skipped: Vec<u32> = export.diagnostics
        .iter()
        .map(|diagnostic| match *diagnostic {
            Diagnostic::EncodeSkippedSize { size } => size,
            ref other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(skipped, vec![228, 152, 144, 120, 96, 72, 24]);
    let mut reloaded = IconPack::new(Platform::Favicon);
    let report = reloaded.load_bytes(&export.bytes.unwrap()).unwrap();
    assert_eq!(report.loaded, 3);
    for size in [64, 32, 16] {
        let index = reloaded.index_of(size).unwrap();
        assert_eq!(reloaded.entry(index).unwrap(), pack.entry(index).unwrap());
    }
}

#[test]
fn text_survives_round_trip_only_when_exported() {
    let mut pack = windows_pack_with_256();
    pack.generate_missing(Target::All, ScaleAlgorithm::Nearest).unwrap();
    let index = pack.index_of(128).unwrap();
    pack.set_text(index, "hello").unwrap();

    for format in [ContainerFormat::Ico, ContainerFormat::Icns] {
        let mut with_text = IconPack::new(Platform::Windows);
        with_text.load_bytes(&encode(&pack, format, true)).unwrap();
        assert_eq!(with_text.entry(index).unwrap().text(), "hello");

        let mut without_text = IconPack::new(Platform::Windows);
        without_text.load_bytes(&encode(&pack, format, false)).unwrap();
        assert!(without_text.entry(index).unwrap().is_valid());
        assert_eq!(without_text.entry(index).unwrap().text(), "");
    }
}

#[test]
fn icns_unknown_chunk_is_skipped() {
    let mut family = IconFamily::new();
    family.add_icon(&PixelBuffer::solid(128, [40, 80, 120, 255]), b"").unwrap();
    family.elements.push(IconElement::new(OSType(*b"it32"), vec![0; 64]));
    let mut bytes = Vec::new();
    family.write(&mut bytes).unwrap();
    assert_eq!(family.elements[0].icon_type(), Some(IconType::RGBA32_128x128));

    let mut diagnostics = Vec::new();
    let images = DecodedContainer::decode(&bytes, &mut diagnostics).unwrap().into_images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].size(), 128);
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::UnsupportedPayload { index: 1, .. }));

    let mut pack = IconPack::new(Platform::MacOS);
    let report = pack.load_bytes(&bytes).unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(pack.count_valid(), 1);
}

#[test]
fn mismatched_inputs_leave_pack_unchanged() {
    let mut pack = IconPack::new(Platform::IOS);
    let before = pack.clone();
    let wide = PixelBuffer::new(PixelFormat::RGBA, 64, 32).to_png().unwrap();
    let report = pack.load_bytes(&wide).unwrap();
    assert_eq!(report.diagnostics,
               vec![Diagnostic::GeometryMismatch { width: 64, height: 32 }]);
    let unlisted = PixelBuffer::solid(100, [0, 0, 0, 255]).to_png().unwrap();
    let report = pack.load_bytes(&unlisted).unwrap();
    assert_eq!(report.loaded, 0);
    assert_eq!(pack, before);
}

#[test]
fn custom_sizes_round_trip_through_ico() {
    let mut pack = IconPack::with_sizes(&[1024, 300, 20]).unwrap();
    pack.load_bytes(&gradient(256).to_png().unwrap()).unwrap();
    assert_eq!(pack.count_valid(), 0);
    pack.generate_from(&gradient(256), Target::All, ScaleAlgorithm::Smooth).unwrap();
    let bytes = encode(&pack, ContainerFormat::Ico, false);
    let mut reloaded = IconPack::with_sizes(&[1024, 300, 20]).unwrap();
    assert_eq!(reloaded.load_bytes(&bytes).unwrap().loaded, 3);
    assert_eq!(reloaded, pack);
}
