//! Benchmarks for the htmlcomb scraping pipeline using Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use htmlcomb::forest;
use htmlcomb::scraper::{htmls, texts};
use htmlcomb::selector::{nested, tag};
use htmlcomb::tag_info::annotate_tags;
use htmlcomb::{scrape_on_this_thread, tokenize};

// ============================================================================
// Sample HTML Content
// ============================================================================

const SIMPLE_TEXT: &str = "Hello, World!";

const BASIC_TAGS: &str = "<b>Bold</b> and <i>italic</i> and <u>underline</u>";

const NESTED_TAGS: &str = "<b><i><u>Triple nested formatting</u></i></b>";

const LINK_TAG: &str = r#"<a href="https://example.com">Example Website</a>"#;

const QUOTE_BLOCK: &str = r#"<blockquote cite="PreviousUser">This is a quoted message from someone else</blockquote>"#;

const CODE_BLOCK: &str = r#"<pre><code class="language-rust">
fn main() {
    println!("Hello, world!");
    let x = 42;
    for i in 0..x {
        println!("{}", i);
    }
}
</code></pre>"#;

const LIST_BLOCK: &str = r#"<ol>
<li>First item</li>
<li>Second item</li>
<li>Third item</li>
<li>Fourth item</li>
<li>Fifth item</li>
</ol>"#;

const COMPLEX_POST: &str = r#"<blockquote cite="Admin">Please follow the rules</blockquote>

<p>I have some thoughts on this:</p>

<b>Main Points:</b>
<ul>
<li><i>First point</i> - This is important</li>
<li><i>Second point</i> - Also important</li>
<li><i>Third point</i> - Very important</li>
</ul>

<p>Here's some code:</p>
<pre><code class="language-python">
def hello():
    print("Hello, World!")
</code></pre>

<p>Check out <a href="https://example.com">this link</a> for more info.</p>

<center><span style="color:gray;font-size:2em">
Thanks for reading!
</span></center>"#;

const TABLE_BLOCK: &str = r#"<table>
<tr><th>Name</th><th>Value</th><th>Description</th></tr>
<tr><td>Item 1</td><td>100</td><td>First item</td></tr>
<tr><td>Item 2</td><td>200</td><td>Second item</td></tr>
<tr><td>Item 3</td><td>300</td><td>Third item</td></tr>
<tr><td>Item 4</td><td>400</td><td>Fourth item</td></tr>
</table>"#;

// ============================================================================
// Scraping Benchmarks
// ============================================================================

fn bench_scrape_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrape_simple");

    group.throughput(Throughput::Bytes(SIMPLE_TEXT.len() as u64));
    group.bench_function("plain_text", |b| {
        b.iter(|| scrape_on_this_thread(black_box(SIMPLE_TEXT), |s| texts(s, &tag("b"))))
    });

    group.throughput(Throughput::Bytes(BASIC_TAGS.len() as u64));
    group.bench_function("basic_tags", |b| {
        b.iter(|| scrape_on_this_thread(black_box(BASIC_TAGS), |s| texts(s, &tag("b"))))
    });

    group.throughput(Throughput::Bytes(NESTED_TAGS.len() as u64));
    group.bench_function("nested_tags", |b| {
        b.iter(|| {
            scrape_on_this_thread(black_box(NESTED_TAGS), |s| {
                texts(s, &nested(tag("b"), nested(tag("i"), tag("u"))))
            })
        })
    });

    group.finish();
}

fn bench_scrape_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrape_blocks");

    group.throughput(Throughput::Bytes(LINK_TAG.len() as u64));
    group.bench_function("link", |b| {
        b.iter(|| scrape_on_this_thread(black_box(LINK_TAG), |s| texts(s, &tag("a"))))
    });

    group.throughput(Throughput::Bytes(QUOTE_BLOCK.len() as u64));
    group.bench_function("quote", |b| {
        b.iter(|| scrape_on_this_thread(black_box(QUOTE_BLOCK), |s| texts(s, &tag("blockquote"))))
    });

    group.throughput(Throughput::Bytes(CODE_BLOCK.len() as u64));
    group.bench_function("code", |b| {
        b.iter(|| scrape_on_this_thread(black_box(CODE_BLOCK), |s| texts(s, &tag("code"))))
    });

    group.throughput(Throughput::Bytes(LIST_BLOCK.len() as u64));
    group.bench_function("list", |b| {
        b.iter(|| scrape_on_this_thread(black_box(LIST_BLOCK), |s| texts(s, &tag("li"))))
    });

    group.throughput(Throughput::Bytes(TABLE_BLOCK.len() as u64));
    group.bench_function("table", |b| {
        b.iter(|| scrape_on_this_thread(black_box(TABLE_BLOCK), |s| texts(s, &tag("td"))))
    });

    group.finish();
}

fn bench_scrape_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("scrape_complex");

    group.throughput(Throughput::Bytes(COMPLEX_POST.len() as u64));
    group.bench_function("forum_post", |b| {
        b.iter(|| scrape_on_this_thread(black_box(COMPLEX_POST), |s| htmls(s, &tag("li"))))
    });

    group.finish();
}

// ============================================================================
// Scaling Benchmarks
// ============================================================================

fn bench_scaling_repetitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling_repetitions");

    for count in [1, 10, 100, 1000].iter() {
        let input = BASIC_TAGS.repeat(*count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("basic_tags", count), &input, |b, input| {
            b.iter(|| scrape_on_this_thread(black_box(input), |s| texts(s, &tag("b"))))
        });
    }

    group.finish();
}

fn bench_scaling_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling_nesting");

    for depth in [1, 5, 10, 20, 50].iter() {
        let mut input = String::new();
        for _ in 0..*depth {
            input.push_str("<b>");
        }
        input.push_str("deep");
        for _ in 0..*depth {
            input.push_str("</b>");
        }

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("depth", depth), &input, |b, input| {
            b.iter(|| scrape_on_this_thread(black_box(input), |s| texts(s, &tag("b"))))
        });
    }

    group.finish();
}

fn bench_scaling_list_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling_list");

    for item_count in [1, 10, 50, 100].iter() {
        let mut input = String::from("<ul>");
        for i in 0..*item_count {
            input.push_str(&format!("<li>Item number {}</li>", i));
        }
        input.push_str("</ul>");

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("items", item_count), &input, |b, input| {
            b.iter(|| scrape_on_this_thread(black_box(input), |s| texts(s, &tag("li"))))
        });
    }

    group.finish();
}

// ============================================================================
// Component Benchmarks
// ============================================================================

fn bench_tokenizer_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    group.throughput(Throughput::Bytes(COMPLEX_POST.len() as u64));
    group.bench_function("complex_post", |b| b.iter(|| tokenize(black_box(COMPLEX_POST))));

    group.finish();
}

fn bench_annotate_and_forest_only(c: &mut Criterion) {
    let tokens = tokenize(COMPLEX_POST);

    let mut group = c.benchmark_group("annotate_and_forest");

    group.throughput(Throughput::Bytes(COMPLEX_POST.len() as u64));
    group.bench_function("complex_post", |b| {
        b.iter(|| {
            let infos = annotate_tags(black_box(&tokens));
            forest::from_tag_info(&tokens, &infos)
        })
    });

    group.finish();
}

// ============================================================================
// Real-world Simulation
// ============================================================================

fn bench_realistic_workload(c: &mut Criterion) {
    let posts: Vec<&str> = vec![
        SIMPLE_TEXT,
        BASIC_TAGS,
        LINK_TAG,
        CODE_BLOCK,
        LIST_BLOCK,
        COMPLEX_POST,
        TABLE_BLOCK,
    ];

    let mut group = c.benchmark_group("realistic_workload");
    group.bench_function("mixed_posts", |b| {
        b.iter(|| {
            for post in &posts {
                let _ = scrape_on_this_thread(black_box(post), |s| texts(s, &tag("li")));
            }
        })
    });

    group.finish();
}

criterion_group!(simple, bench_scrape_simple);
criterion_group!(blocks, bench_scrape_blocks);
criterion_group!(complex, bench_scrape_complex);

criterion_group!(
    scaling,
    bench_scaling_repetitions,
    bench_scaling_nesting_depth,
    bench_scaling_list_items,
);

criterion_group!(components, bench_tokenizer_only, bench_annotate_and_forest_only);

criterion_group!(realistic, bench_realistic_workload);

criterion_main!(simple, blocks, complex, scaling, components, realistic);
