use barcode_registry::{
    DecodeEngine, DecoderType, GlobalSettings, LicenseGrant, Registry, StaticLicenseService,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::GrayImage;

fn licensed_registry() -> Registry {
    Registry::new(StaticLicenseService::new().with_key("KEY", LicenseGrant::full("bench")))
}

fn bench_initialize(c: &mut Criterion) {
    let registry = licensed_registry();
    c.bench_function("initialize_with_license_key", |b| {
        b.iter(|| {
            let config = registry
                .initialize_with_license_key(black_box("KEY"))
                .into_config();
            if let Some(config) = config {
                registry.release(config.read().handle());
            }
        })
    });
}

fn bench_get_by_handle(c: &mut Criterion) {
    let registry = licensed_registry();
    let handles: Vec<_> = (0..256)
        .filter_map(|_| registry.default_config().into_config())
        .map(|config| config.read().handle())
        .collect();
    c.bench_function("get_by_handle_256_live", |b| {
        b.iter(|| {
            for &handle in &handles {
                black_box(registry.get_by_handle(black_box(handle)));
            }
        })
    });
}

fn bench_set_enabled_decoders(c: &mut Criterion) {
    let registry = licensed_registry();
    let Some(config) = registry.initialize_with_license_key("KEY").into_config() else {
        return;
    };
    let wanted = [
        DecoderType::QR,
        DecoderType::Code128,
        DecoderType::Ean13,
        DecoderType::Datamatrix,
    ];
    c.bench_function("set_enabled_decoders_4", |b| {
        b.iter(|| config.write().set_enabled_decoders(black_box(&wanted)))
    });
}

struct RoiCrop;

impl DecodeEngine for RoiCrop {
    type Output = u32;

    fn decode(
        &self,
        config: &barcode_registry::Config,
        _settings: &GlobalSettings,
        image: &GrayImage,
    ) -> u32 {
        config.region_of_interest().crop(image).width()
    }
}

fn bench_decode_dispatch(c: &mut Criterion) {
    let registry = licensed_registry();
    let Some(config) = registry.initialize_with_license_key("KEY").into_config() else {
        return;
    };
    let handle = {
        let mut config = config.write();
        config.set_region_of_interest(25.0, 25.0, 50.0, 50.0);
        config.handle()
    };
    let image = GrayImage::new(640, 480);
    c.bench_function("decode_dispatch_640x480_roi", |b| {
        b.iter(|| registry.decode(black_box(handle), &RoiCrop, black_box(&image)))
    });
}

criterion_group!(
    benches,
    bench_initialize,
    bench_get_by_handle,
    bench_set_enabled_decoders,
    bench_decode_dispatch
);
criterion_main!(benches);
