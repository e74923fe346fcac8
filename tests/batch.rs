extern crate iconpack;
extern crate tempfile;

use std::fs;

use iconpack::batch;
use iconpack::{ContainerFormat, Diagnostic, ExportOptions, Extract, IconPack, PixelBuffer,
               PixelFormat, Platform, ScaleAlgorithm, Settings, Target};

fn write_png(dir: &tempfile::TempDir, name: &str, image: &PixelBuffer) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, image.to_png().unwrap()).unwrap();
    path
}

#[test]
fn default_settings_build_windows_ico() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_png(&dir, "logo.png", &PixelBuffer::solid(512, [10, 20, 30, 255]));
    let output = dir.path().join("logo.ico");
    let summary = batch::process(&Settings::default(), &[&input], &output).unwrap();
    assert_eq!(summary.staged, 1);
    assert_eq!(summary.copied, 0);
    assert_eq!(summary.generated, 8);
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));

    let mut pack = IconPack::new(Platform::Windows);
    let report = pack.load_file(&output).unwrap();
    assert_eq!(report.loaded, 8);
    for entry in pack.entries() {
        assert_eq!(entry.pixels(), &PixelBuffer::solid(entry.size(), [10, 20, 30, 255]));
    }
}

#[test]
fn exact_sizes_are_copied_and_first_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_png(&dir, "a.png", &PixelBuffer::solid(32, [1, 1, 1, 255]));
    let second = write_png(&dir, "b.png", &PixelBuffer::solid(32, [2, 2, 2, 255]));
    let big = write_png(&dir, "c.png", &PixelBuffer::solid(64, [3, 3, 3, 255]));
    let output = dir.path().join("out.icns");
    let settings = Settings {
        sizes: Some(vec![64, 32, 16]),
        algorithm: ScaleAlgorithm::Nearest,
        ..Settings::default()
    };
    let summary = batch::process(&settings, &[first, second, big], &output).unwrap();
    assert_eq!(summary.copied, 2);
    assert_eq!(summary.generated, 1);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[0..4], b"icns");
    let mut pack = IconPack::with_sizes(&[64, 32, 16]).unwrap();
    pack.load_bytes(&bytes).unwrap();
    assert_eq!(pack.entry(1).unwrap().pixels(), &PixelBuffer::solid(32, [1, 1, 1, 255]));
    assert_eq!(pack.entry(2).unwrap().pixels(), &PixelBuffer::solid(16, [3, 3, 3, 255]));
}

#[test]
fn non_square_inputs_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let wide = write_png(&dir, "wide.png", &PixelBuffer::new(PixelFormat::RGBA, 40, 20));
    let output = dir.path().join("out.ico");
    let summary = batch::process(&Settings::default(), &[wide], &output).unwrap();
    assert_eq!(summary.staged, 0);
    assert_eq!(summary.diagnostics,
               vec![Diagnostic::GeometryMismatch { width: 40, height: 20 }]);
    assert!(summary.output.is_none());
    assert!(!output.exists());
}

#[test]
fn extraction_writes_staged_images() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = IconPack::new(Platform::Windows);
    source.generate_from(&PixelBuffer::solid(256, [9, 8, 7, 255]),
                       Target::All,
                       ScaleAlgorithm::Smooth)
        .unwrap();
    let index = source.index_of(48).unwrap();
    source.set_text(index, "forty-eight").unwrap();
    let input = dir.path().join("app.ico");
    source.save(&input, ContainerFormat::Ico, &ExportOptions { export_text: true }).unwrap();

    let output = dir.path().join("bundle.ico");
    let settings = Settings {
        platform: Some(Platform::Favicon),
        export_text: true,
        extract: Extract::Sizes(vec![48, 16, 1000]),
        ..Settings::default()
    };
    let summary = batch::process(&settings, &[&input], &output).unwrap();
    assert_eq!(summary.extracted,
               vec![dir.path().join("bundle_48x48.png"), dir.path().join("bundle_16x16.png")]);

    let png = fs::read(dir.path().join("bundle_48x48.png")).unwrap();
    assert_eq!(iconpack::textchunk::read(&png), Some(b"forty-eight".to_vec()));
    let mut pack = IconPack::with_sizes(&[48]).unwrap();
    pack.load_bytes(&png).unwrap();
    assert_eq!(pack.entry(0).unwrap().pixels(), &PixelBuffer::solid(48, [9, 8, 7, 255]));
}

#[test]
fn unreadable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.ico");
    fs::write(&junk, b"\0\0\x01\0\x02\0").unwrap();
    let output = dir.path().join("out.ico");
    let result = batch::process(&Settings::default(), &[junk], &output);
    assert!(matches!(result, Err(iconpack::Error::MalformedContainer(_))));
    let missing = dir.path().join("missing.png");
    let result = batch::process(&Settings::default(), &[missing], &output);
    assert!(matches!(result, Err(iconpack::Error::Io(_))));
}
