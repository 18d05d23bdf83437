use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use upload_validator::template::TemplateRegistry;
use upload_validator::{validate_reader, validate_text, CompiledTemplate};

const HEADER: &str = concat!(
    "account_number,meter_id,uom,collection_method,tags,",
    "latitude,longitude,active,contact_email,contact_phone\n"
);

fn meter_template() -> CompiledTemplate {
    let mut registry = TemplateRegistry::new();
    registry.add_embedded_templates();
    let loaded = registry
        .get("meter-readings")
        .expect("embedded meter-readings template");
    CompiledTemplate::compile(&loaded.template)
}

/// Generate upload content with specific validation scenarios
fn generate_validation_content(rows: usize, scenario: &str) -> String {
    let mut content = String::from(HEADER);

    for i in 0..rows {
        let line = match scenario {
            "all_valid" => valid_row(i),
            "duplicates" => {
                // Every other row repeats the previous meter
                format!(
                    "ACC-{:06},MTR-{},KWH,AMI,,41.8,-87.6,yes,ops@example.com,3125550100",
                    i,
                    i / 2
                )
            }
            "domain_warnings" => format!(
                "ACC-{:06},MTR-{},PARSECS,CELLULAR,zone,95,-190,yes,not-an-email,555",
                i, i
            ),
            "mixed_errors" => match i % 5 {
                0..=1 => valid_row(i),
                2 => format!(",MTR-{},KWH,AMI,,,,,,", i),
                3 => format!("ACC-{:06},MTR-{},KWH,AMI,,abc,-87.6,maybe,,", i, i),
                4 => format!("A!,MTR-{}<>,KWH,RADIO,,,,,,", i),
                _ => unreachable!(),
            },
            _ => valid_row(i),
        };
        content.push_str(&line);
        content.push('\n');
    }

    content
}

fn valid_row(i: usize) -> String {
    format!(
        "ACC-{:06},MTR-{},KWH,AMI,north,41.8,-87.6,yes,ops@example.com,(312) 555-0100",
        i, i
    )
}

/// Benchmark validation across error densities
fn bench_validation_error_density(c: &mut Criterion) {
    let template = meter_template();
    let mut group = c.benchmark_group("validation_error_density");

    for scenario in ["all_valid", "duplicates", "domain_warnings", "mixed_errors"] {
        let content = generate_validation_content(2_000, scenario);
        group.throughput(Throughput::Elements(2_000));
        group.bench_with_input(
            BenchmarkId::new("validate_text", scenario),
            &content,
            |b, content| b.iter(|| black_box(validate_text(black_box(content), &template))),
        );
    }

    group.finish();
}

/// Benchmark validation scalability with file size
fn bench_validation_scalability(c: &mut Criterion) {
    let template = meter_template();
    let mut group = c.benchmark_group("validation_scalability");
    group.sample_size(20);

    for rows in [100, 1_000, 10_000, 50_000] {
        let content = generate_validation_content(rows, "mixed_errors");
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("text", rows), &content, |b, content| {
            b.iter(|| black_box(validate_text(black_box(content), &template)))
        });
        group.bench_with_input(BenchmarkId::new("reader", rows), &content, |b, content| {
            b.iter(|| black_box(validate_reader(black_box(content.as_bytes()), &template)))
        });
    }

    group.finish();
}

/// Benchmark template compilation (patterns are compiled once per template)
fn bench_template_compile(c: &mut Criterion) {
    let mut registry = TemplateRegistry::new();
    registry.add_embedded_templates();
    let template = registry
        .get("meter-readings")
        .expect("embedded template")
        .template
        .clone();

    c.bench_function("compile_meter_template", |b| {
        b.iter(|| black_box(CompiledTemplate::compile(black_box(&template))))
    });
}

criterion_group!(
    validation_benches,
    bench_validation_error_density,
    bench_validation_scalability,
    bench_template_compile
);

criterion_main!(validation_benches);
