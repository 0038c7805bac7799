/// Diagnostic tool to verify data → buckets → layout pipeline
use std::collections::BTreeMap;

use wordcloud_rs::render::svg::SvgSurface;
use wordcloud_rs::render::text::EstimateMeasure;
use wordcloud_rs::render::{Size, Viewport};
use wordcloud_rs::source::DataSource;
use wordcloud_rs::{Cloud, CloudConfig, CloudPhase};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordcloud_rs=debug".parse()?),
        )
        .init();

    let Some(arg) = std::env::args().nth(1) else {
        anyhow::bail!("usage: debug-layout <data.json | url>");
    };

    println!("=== DIAGNOSTIC: Data → Buckets → Layout Pipeline ===");
    println!("Source: {}", arg);

    let source = match std::fs::read_to_string(&arg) {
        Ok(text) => DataSource::Json(text),
        Err(_) => DataSource::infer(arg.clone()),
    };

    let viewport = Viewport {
        container: Size::new(1280.0, 800.0),
        window: Size::new(1920.0, 1080.0),
    };
    let config = CloudConfig {
        ignore_bad_items: true,
        ..CloudConfig::default()
    };

    let start = std::time::Instant::now();
    let surface = SvgSurface::new(EstimateMeasure::default(), viewport);
    let cloud = Cloud::new(config, source, surface)?;
    let elapsed = start.elapsed();

    if cloud.phase() != CloudPhase::Ready {
        println!("\n✗ FAILED: no data received");
        return Ok(());
    }

    println!("\n[1] Loaded in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!("    Topics:   {}", cloud.topics().len());
    println!("    Rejected: {:?}", cloud.rejected());

    println!("\n[2] Size buckets ({}):", cloud.buckets().len());
    let mut per_class: BTreeMap<usize, usize> = BTreeMap::new();
    for (_, topic) in cloud.topics().iter() {
        *per_class.entry(topic.size_class.unwrap_or(0)).or_default() += 1;
    }
    for (i, b) in cloud.buckets().iter().enumerate() {
        println!(
            "    class {} ≈ volume {:.1} ({} topics)",
            i + 1,
            b,
            per_class.get(&(i + 1)).copied().unwrap_or(0)
        );
    }

    let Some(layout) = cloud.layout() else {
        println!("\n✗ FAILED: no layout computed");
        return Ok(());
    };

    println!("\n[3] Top 10 placements (commit order):");
    for (i, p) in layout.placements.iter().take(10).enumerate() {
        let topic = cloud.topics().get(p.topic);
        println!(
            "    [{}] '{}' vol={} class={} - {:.1}x{:.1} at ({:.1}, {:.1})",
            i,
            topic.label,
            topic.volume,
            topic.size_class.unwrap_or(0),
            p.rect.w,
            p.rect.h,
            p.rect.x,
            p.rect.y
        );
    }

    println!("\n[4] Checking for overlaps:");
    let mut overlaps = 0;
    for (i, a) in layout.placements.iter().enumerate() {
        for b in &layout.placements[i + 1..] {
            if a.rect.overlap_area(&b.rect) > 0.0 {
                overlaps += 1;
                if overlaps <= 5 {
                    println!(
                        "    ✗ '{}' overlaps '{}'",
                        cloud.topics().get(a.topic).id,
                        cloud.topics().get(b.topic).id
                    );
                }
            }
        }
    }
    if overlaps == 0 {
        println!("    ✓ No overlapping words");
    }

    if let Some(bounds) = layout.bounds() {
        let word_area: f32 = layout.placements.iter().map(|p| p.rect.w * p.rect.h).sum();
        let box_area = (bounds.w * bounds.h).max(1.0);
        println!("\n[5] Bounds: {:.0}x{:.0} at ({:.0}, {:.0})", bounds.w, bounds.h, bounds.x, bounds.y);
        println!("    Center:  ({:.0}, {:.0})", cloud.center().x, cloud.center().y);
        println!("    Fill:    {:.1}%", word_area / box_area * 100.0);
    }

    Ok(())
}
