// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use org_scrape::specs::{list_org, rusprofile, zchb};

fn load(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn bench_extract(c: &mut Criterion) {
    let rp_search = load("rusprofile_search.html");
    let rp_company = load("rusprofile_company.html");
    let lo_company = load("list_org_company.html");
    let zb_search = load("zchb_search.json");
    let region = "Тюменская область";

    c.bench_function("rusprofile_search", |b| {
        b.iter(|| rusprofile::pick_candidate(black_box(&rp_search), region))
    });

    c.bench_function("rusprofile_company", |b| {
        b.iter(|| rusprofile::parse_company_page(black_box(&rp_company)))
    });

    c.bench_function("list_org_company", |b| {
        b.iter(|| list_org::parse_company_page(black_box(&lo_company)))
    });

    c.bench_function("zchb_search", |b| {
        b.iter(|| zchb::parse_search(black_box(&zb_search), region))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
