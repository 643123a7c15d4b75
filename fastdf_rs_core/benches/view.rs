use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fastdf_core::DataFrame;
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

const NUM_ROWS: usize = 1_000_000;

fn get_bench_df() -> DataFrame<f64> {
    let values = Array2::<f64>::random((NUM_ROWS, 3), Uniform::new(0., 1.));
    DataFrame::new(values, ["A", "B", "C"]).unwrap()
}

pub fn bench_access(c: &mut Criterion) {
    let df = get_bench_df();
    let len = df.len() as isize;

    c.bench_function("element access", |b| {
        let mut i = 0isize;
        b.iter(|| {
            i = (i + 1) % len;
            black_box(df.get_row(black_box(i)).unwrap().get("B").unwrap())
        })
    });
    c.bench_function("element access (loc)", |b| {
        let loc = df.loc();
        let mut i = 0isize;
        b.iter(|| {
            i = (i + 1) % len;
            black_box(loc.row(black_box(i)).unwrap().get("B").unwrap())
        })
    });
    c.bench_function("slice creation", |b| {
        let mut i = 0isize;
        b.iter(|| {
            i = (i + 1) % (len - 10);
            black_box(df.slice(Some(i), Some(i + 10)))
        })
    });
    c.bench_function("nested slice", |b| {
        let mut i = 0isize;
        b.iter(|| {
            i = (i + 1) % (len - 20);
            let outer = df.slice(Some(i), Some(i + 20));
            black_box(outer.slice(Some(5), Some(15)))
        })
    });
    c.bench_function("column access (loc)", |b| {
        let mut loc = df.loc();
        b.iter(|| black_box(loc.column(black_box("C")).unwrap().len()))
    });
}

criterion_group!(benches, bench_access);
criterion_main!(benches);
