//! Job configuration and the public entry points.
//!
//! A [`Runner`] decides how a job executes: sequentially on the calling
//! thread, or in parallel on rayon (the global pool, or a dedicated pool of a
//! fixed size). It also fixes the basesize, the largest subdomain folded
//! without splitting. When no basesize is set, one is derived from the
//! domain length so that the domain splits into about
//! [`default_partitions`](Runner::default_partitions) leaves.
//!
//! The free functions at the crate root ([`reduce`](crate::reduce),
//! [`collect`](crate::collect), ...) run on a default runner with an explicit
//! basesize.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collect::{map_into, Append, Container};
use crate::combiners::{CombineFn, Push, Terminal};
use crate::domain::Domain;
use crate::engine;
use crate::error::FoldError;
use crate::reduced::Acc;
use crate::reducer::{Ctx, Reducer};
use crate::xform::Xform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecMode {
    Sequential,
    /// `threads: None` runs on rayon's global pool.
    Parallel { threads: Option<usize> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Runner {
    pub mode: ExecMode,
    /// Fixed basesize; derived from the domain length when `None`.
    pub basesize: Option<usize>,
    /// Deepest [`tcat`](crate::xform::tcat) nesting level that still
    /// parallelizes. `Some(0)` parallelizes only the top-level domain.
    pub nested_depth: Option<usize>,
    pub default_partitions: usize,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel { threads: None },
            basesize: None,
            nested_depth: None,
            default_partitions: 2 * num_cpus::get().max(2),
        }
    }
}

impl Runner {
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Self::default()
        }
    }

    pub fn parallel() -> Self {
        Self::default()
    }

    pub fn with_basesize(mut self, basesize: usize) -> Self {
        self.basesize = Some(basesize);
        self
    }

    /// Run parallel jobs on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.mode = ExecMode::Parallel {
            threads: Some(threads),
        };
        self
    }

    pub fn with_nested_depth(mut self, depth: usize) -> Self {
        self.nested_depth = Some(depth);
        self
    }

    /// Parse a runner from JSON. Missing fields take their default values.
    ///
    /// ```
    /// use ironfold::{ExecMode, Runner};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let r = Runner::from_json(r#"{ "mode": "Sequential", "basesize": 64 }"#)?;
    /// assert_eq!(r.mode, ExecMode::Sequential);
    /// assert_eq!(r.basesize, Some(64));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json(s: &str) -> Result<Self> {
        let runner: Self = serde_json::from_str(s).context("parsing runner config")?;
        runner.validate()?;
        Ok(runner)
    }

    pub fn validate(&self) -> Result<()> {
        if self.basesize == Some(0) {
            return Err(FoldError::InvalidConfig("basesize must be at least 1".into()).into());
        }
        if self.default_partitions == 0 {
            let msg = "default_partitions must be at least 1";
            return Err(FoldError::InvalidConfig(msg.into()).into());
        }
        if let ExecMode::Parallel { threads: Some(0) } = self.mode {
            let msg = "a dedicated pool needs at least one thread";
            return Err(FoldError::InvalidConfig(msg.into()).into());
        }
        Ok(())
    }

    /// Basesize used for a domain of `len` items.
    pub fn basesize_for(&self, len: usize) -> usize {
        self.basesize
            .unwrap_or_else(|| len.div_ceil(self.default_partitions).max(1))
    }

    fn ctx(&self, len: usize) -> Ctx {
        let parallel = cfg!(feature = "parallel") && matches!(self.mode, ExecMode::Parallel { .. });
        Ctx::new(self.basesize_for(len), parallel, self.nested_depth)
    }

    /// Reduce `domain` through the pipeline `xf` into `op`, starting from `init`.
    ///
    /// `init` must be an identity of `op`'s merge: every leaf starts from it.
    /// A short-circuited result comes back as [`Acc::Reduced`] and skips
    /// `op`'s finish step; otherwise the finished value comes back as
    /// [`Acc::Continue`].
    pub fn reduce<A, D, X, C>(&self, op: C, xf: X, domain: D, init: A) -> Result<Acc<A>>
    where
        A: Clone + Send,
        D: Domain,
        X: Xform<D::Item>,
        C: CombineFn<A, X::Out>,
    {
        self.validate()?;
        let rf = xf.apply::<A, _>(Terminal(op));
        let len = domain.checked_len()?;
        let ctx = self.ctx(len);
        debug!(
            mode = ?self.mode,
            len,
            basesize = ctx.basesize(),
            shape = D::SHAPE,
            "reduce started"
        );

        let out = self.install(|| engine::run(&rf, init, domain, &ctx))??;
        debug!(reduced = out.is_reduced(), "reduce finished");
        match out {
            Acc::Continue(acc) => rf.complete(acc).map(Acc::Continue),
            reduced @ Acc::Reduced(_) => Ok(reduced),
        }
    }

    /// Collect the pipeline's output into a `Vec`, in domain order.
    ///
    /// A short-circuiting stage truncates the output after its matching item.
    pub fn collect<D, X>(&self, xf: X, domain: D) -> Result<Vec<X::Out>>
    where
        D: Domain,
        X: Xform<D::Item>,
        X::Out: Clone + Send,
    {
        self.reduce(Push, xf, domain, Vec::new()).map(Acc::into_inner)
    }

    /// Collect the pipeline's output into any [`Container`], in domain order.
    pub fn copy_into<C, D, X>(&self, xf: X, domain: D) -> Result<C>
    where
        D: Domain,
        X: Xform<D::Item>,
        C: Container<X::Out> + Clone,
    {
        self.reduce(Append::<C>::new(), xf, domain, C::default())
            .map(Acc::into_inner)
    }

    /// Map every item into a pre-sized `Vec`, writing each leaf's results
    /// straight into its own output range.
    pub fn map_collect<D, F, U>(&self, f: F, domain: D) -> Result<Vec<U>>
    where
        D: Domain,
        F: Fn(D::Item) -> U + Send + Sync,
        U: Send,
    {
        self.validate()?;
        let len = domain.checked_len()?;
        let ctx = self.ctx(len);
        debug!(
            mode = ?self.mode,
            len,
            basesize = ctx.basesize(),
            shape = D::SHAPE,
            "map_collect started"
        );
        self.install(|| map_into(&f, domain, &ctx))?
    }

    #[cfg(feature = "parallel")]
    fn install<T: Send>(&self, job: impl FnOnce() -> T + Send) -> Result<T> {
        match self.mode {
            ExecMode::Parallel { threads: Some(n) } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| FoldError::ThreadPool(e.to_string()))?;
                Ok(pool.install(job))
            }
            _ => Ok(job()),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn install<T>(&self, job: impl FnOnce() -> T) -> Result<T> {
        Ok(job())
    }
}

/* ===================== Free functions ===================== */

/// [`Runner::reduce`] on a default runner with the given basesize.
pub fn reduce<A, D, X, C>(op: C, xf: X, domain: D, init: A, basesize: usize) -> Result<Acc<A>>
where
    A: Clone + Send,
    D: Domain,
    X: Xform<D::Item>,
    C: CombineFn<A, X::Out>,
{
    Runner::default().with_basesize(basesize).reduce(op, xf, domain, init)
}

/// [`Runner::collect`] on a default runner with the given basesize.
pub fn collect<D, X>(xf: X, domain: D, basesize: usize) -> Result<Vec<X::Out>>
where
    D: Domain,
    X: Xform<D::Item>,
    X::Out: Clone + Send,
{
    Runner::default().with_basesize(basesize).collect(xf, domain)
}

/// [`Runner::copy_into`] on a default runner with the given basesize.
pub fn copy_into<C, D, X>(xf: X, domain: D, basesize: usize) -> Result<C>
where
    D: Domain,
    X: Xform<D::Item>,
    C: Container<X::Out> + Clone,
{
    Runner::default().with_basesize(basesize).copy_into(xf, domain)
}

/// [`Runner::map_collect`] on a default runner with the given basesize.
pub fn map_collect<D, F, U>(f: F, domain: D, basesize: usize) -> Result<Vec<U>>
where
    D: Domain,
    F: Fn(D::Item) -> U + Send + Sync,
    U: Send,
{
    Runner::default().with_basesize(basesize).map_collect(f, domain)
}
