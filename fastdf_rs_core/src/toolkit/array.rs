use std::fmt::{Debug, Display};

use itertools::izip;
use ndarray::{ArrayView1, ArrayView2, Axis};
use num_traits::Float;
use rayon::ThreadPool;

/// element type of a frame buffer
pub trait AFloat: Float + Debug + Display + Default + Send + Sync + 'static {}

impl AFloat for f32 {}
impl AFloat for f64 {}

pub fn nanmean<T: AFloat>(a: ArrayView1<T>) -> T {
    let mut sum = T::zero();
    let mut num = T::zero();
    for &x in a.iter() {
        if x.is_nan() {
            continue;
        }
        sum = sum + x;
        num = num + T::one();
    }
    if num == T::zero() {
        T::nan()
    } else {
        sum / num
    }
}

pub fn nansum<T: AFloat>(a: ArrayView1<T>) -> T {
    a.iter()
        .filter(|x| !x.is_nan())
        .fold(T::zero(), |acc, &x| acc + x)
}

fn nan_extreme<T: AFloat>(a: ArrayView1<T>, pick: fn(T, T) -> T) -> T {
    a.iter()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, &x| Some(acc.map_or(x, |m| pick(m, x))))
        .unwrap_or_else(T::nan)
}

pub fn nanmin<T: AFloat>(a: ArrayView1<T>) -> T {
    nan_extreme(a, Float::min)
}

pub fn nanmax<T: AFloat>(a: ArrayView1<T>) -> T {
    nan_extreme(a, Float::max)
}

/// nonzero values (NaN included) count as `true`
pub fn any_nonzero<T: AFloat>(a: ArrayView1<T>) -> bool {
    a.iter().any(|&x| x != T::zero())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Mean,
    Sum,
    Min,
    Max,
}

impl Reduction {
    #[inline]
    pub fn apply<T: AFloat>(self, lane: ArrayView1<T>) -> T {
        match self {
            Reduction::Mean => nanmean(lane),
            Reduction::Sum => nansum(lane),
            Reduction::Min => nanmin(lane),
            Reduction::Max => nanmax(lane),
        }
    }
}

/// Applies `f` to every row of `a`.
///
/// With a `pool`, rows are split into one contiguous chunk per pool thread and
/// each chunk writes into its own disjoint part of the output.
pub fn map_rows<T, R, F>(a: ArrayView2<T>, pool: Option<&ThreadPool>, f: F) -> Vec<R>
where
    T: AFloat,
    R: Copy + Default + Send,
    F: Fn(ArrayView1<T>) -> R + Sync,
{
    let num_rows = a.nrows();
    let mut res: Vec<R> = vec![R::default(); num_rows];
    let pool = match pool {
        Some(pool) if num_rows > 1 => pool,
        _ => {
            izip!(res.iter_mut(), a.rows()).for_each(|(r, row)| *r = f(row));
            return res;
        }
    };
    let chunk_size = num_rows.div_ceil(pool.current_num_threads()).max(1);
    let f = &f;
    pool.scope(|s| {
        izip!(res.chunks_mut(chunk_size), a.axis_chunks_iter(Axis(0), chunk_size)).for_each(
            |(out, rows)| {
                s.spawn(move |_| {
                    izip!(out.iter_mut(), rows.rows()).for_each(|(r, row)| *r = f(row));
                });
            },
        );
    });
    res
}
