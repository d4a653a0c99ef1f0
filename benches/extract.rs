// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cap_scrape::config::options::Disambiguation;
use cap_scrape::core::slug::slugify;
use cap_scrape::specs::salary::{extract, read_page};

// Roughly the shape of a rendered contract page: lots of chrome around a
// small contract block.
fn sample_page() -> String {
    let mut page = String::from("<html><head><script>var x = {\"cap\": \"$1\"};</script></head><body>");
    for i in 0..400 {
        page.push_str(&format!("<div class=\"nav\"><a href=\"/team/{i}\">Team {i}</a></div>\n"));
    }
    page.push_str("<section><h2>Current Contract</h2>");
    page.push_str("<div><span>Cap Hit</span><span class=\"val-lg\">$10,903,000</span></div>");
    page.push_str("<div>Toronto Maple Leafs</div><h2>Profile</h2></section>");
    for i in 0..400 {
        page.push_str(&format!("<p>Season {i}: $1,{i:03},000 signing bonus</p>\n"));
    }
    page.push_str("</body></html>");
    page
}

fn bench_extract(c: &mut Criterion) {
    let page = sample_page();
    let headline_only = "<span class=\"val-lg\">$4,250,000</span>".repeat(50);

    c.bench_function("extract_contract_section", |b| {
        b.iter(|| extract(black_box(&page)))
    });

    c.bench_function("extract_headline_fallback", |b| {
        b.iter(|| extract(black_box(&headline_only)))
    });

    c.bench_function("read_page_strict_team", |b| {
        b.iter(|| read_page(black_box(&page), "Toronto", Disambiguation::StrictTeamMatch))
    });

    c.bench_function("slugify", |b| {
        b.iter(|| slugify(black_box("Jean-Gabriel Pageau Jr.")))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
