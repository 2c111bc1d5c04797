use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zbuf::bench::{DepthBuffer, FlatShader, FrameBuffer, Projection, ScanlineRasterizer, Triangle};
use zbuf::colors::Color;
use zbuf::figure::{Face, Figure, Figures, Material};
use zbuf::light::Light;
use zbuf::math::Vector;
use zbuf::{Engine, Image, RenderMode, RenderSettings, Scene};

const BUFFER_SIZE: u32 = 800;

fn projection() -> Projection {
    Projection::new(800.0, 400.0, 400.0, BUFFER_SIZE, BUFFER_SIZE)
}

/// A counter-clockwise triangle of half-extent `r` (in camera units) at depth -1.
fn triangle(r: f64) -> Triangle {
    Triangle::project(
        [
            Vector::point(-r, -r, -1.0),
            Vector::point(r, -r, -1.0),
            Vector::point(0.0, r, -1.0),
        ],
        &projection(),
    )
    .expect("triangle is in front of the camera")
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let shader = FlatShader::new(Color::WHITE);
    let projection = projection();

    for (name, triangle) in [
        ("small", triangle(0.02)),
        ("medium", triangle(0.1)),
        ("large", triangle(0.45)),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let mut image = Image::new(BUFFER_SIZE, BUFFER_SIZE, Color::BLACK);
            let mut depth = DepthBuffer::new(BUFFER_SIZE, BUFFER_SIZE);
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut image, &mut depth);
                scanline.fill_triangle(black_box(tri), &projection, &mut fb, &shader);
            });
        });

        group.bench_with_input(BenchmarkId::new("depth_only", name), &triangle, |b, tri| {
            let mut depth = DepthBuffer::new(BUFFER_SIZE, BUFFER_SIZE);
            b.iter(|| scanline.fill_depth(black_box(tri), &projection, &mut depth));
        });
    }

    group.finish();
}

/// A `n` x `n` grid of quads in the z = 0 plane, facing +Z.
fn grid(n: usize) -> Figure {
    let mut points = Vec::new();
    for row in 0..=n {
        for col in 0..=n {
            let x = col as f64 / n as f64 * 2.0 - 1.0;
            let y = row as f64 / n as f64 * 2.0 - 1.0;
            points.push(Vector::point(x, y, 0.0));
        }
    }
    let mut faces = Vec::new();
    for row in 0..n {
        for col in 0..n {
            let i = row * (n + 1) + col;
            faces.push(Face::new(vec![i, i + 1, i + n + 2, i + n + 1]));
        }
    }
    let material = Material {
        ambient: Color::gray(0.2),
        diffuse: Color::gray(0.6),
        specular: Color::gray(0.4),
        reflection_coefficient: 20.0,
    };
    Figure::new(points, faces, material)
}

fn benchmark_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_render");

    let scene = Scene::new(
        std::iter::once(grid(20)).collect::<Figures>(),
        vec![
            Light::point(Vector::point(2.0, 2.0, 5.0)).with_specular(Color::WHITE),
            Light::infinite(Vector::direction(0.0, 0.0, -1.0)).with_ambient(Color::WHITE),
        ],
    );

    for (name, mode, shadows) in [
        ("wireframe", RenderMode::Wireframe, false),
        ("zbuffering", RenderMode::ZBuffering, false),
        ("lighted", RenderMode::LightedZBuffering, false),
        ("lighted_shadows", RenderMode::LightedZBuffering, true),
    ] {
        let engine = Engine::new(RenderSettings {
            size: 400,
            mode,
            shadows,
            shadow_mask_size: 400,
            ..RenderSettings::default()
        });
        group.bench_function(name, |b| b.iter(|| engine.render(black_box(&scene))));
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_full_render);
criterion_main!(benches);
