//! Human-readable inspection dumps.
//!
//! Diagnostics only — the rendered text is not part of the data contract.

use std::fmt::Write;

use crate::inspector::Inspector;

/// How much of the partition/coloring/tiling state to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    /// A handful of rows per table.
    Low,
    /// A few dozen rows per table.
    Medium,
    /// Everything.
    High,
}

impl Verbosity {
    fn iteration_rows(self) -> usize {
        match self {
            Self::Low => 8,
            Self::Medium => 32,
            Self::High => usize::MAX,
        }
    }

    fn iterations_per_tile(self) -> usize {
        match self {
            Self::Low => 4,
            Self::Medium => 16,
            Self::High => usize::MAX,
        }
    }
}

impl Inspector {
    /// Render a bounded dump of the inspection state.
    ///
    /// Lists the loop chain, the seed partitioning table, and the per-loop
    /// tiled iteration lists, eliding rows beyond the verbosity caps.
    /// Loops the run did not reach are marked `NOT TILED`.
    pub fn summary(&self, verbosity: Verbosity) -> String {
        let mut out = String::new();
        let _ = writeln!(out, ":: Inspector info ::");
        let _ = writeln!(out, "phase: {}", self.phase());
        if self.n_loops() == 0 {
            let _ = writeln!(out, "no loops registered");
            return out;
        }
        match self.seed() {
            Some(seed) => {
                let _ = writeln!(out, "loops: {}, seed loop: {seed}", self.n_loops());
            }
            None => {
                let _ = writeln!(out, "loops: {}, not yet run", self.n_loops());
            }
        }
        let _ = writeln!(
            out,
            "tiles: {}, average tile size: {}",
            self.tiles().len(),
            self.config().avg_tile_size
        );

        match (self.iter2tile(), self.iter2color()) {
            (Some(i2t), Some(i2c)) => {
                let _ = writeln!(out, "\nseed partitioning (iteration | tile | color):");
                let size = i2t.in_size() as usize;
                let rows = verbosity.iteration_rows().min(size);
                for i in 0..rows {
                    let _ = writeln!(
                        out,
                        "  {i:>6} | {:>4} | {:>4}",
                        i2t.values()[i],
                        i2c.values()[i]
                    );
                }
                if rows < size {
                    let last = size - 1;
                    let _ = writeln!(out, "     ...");
                    let _ = writeln!(
                        out,
                        "  {last:>6} | {:>4} | {:>4}",
                        i2t.values()[last],
                        i2c.values()[last]
                    );
                }
            }
            _ => {
                let _ = writeln!(out, "seed loop not yet partitioned");
            }
        }

        if !self.tiles().is_empty() {
            for l in self.loops() {
                let tiled = self.tiled_loops().contains(&l.index);
                let _ = writeln!(
                    out,
                    "\nloop {} - {}{}",
                    l.index,
                    l.name,
                    if tiled { "" } else { " (NOT TILED)" }
                );
                if tiled {
                    self.write_tiled_loop(&mut out, l.index, verbosity.iterations_per_tile());
                }
            }
        }
        out
    }

    fn write_tiled_loop(&self, out: &mut String, loop_index: usize, cap: usize) {
        let _ = writeln!(out, "  tile | color | iterations");
        for i in 0..self.tiles().len() {
            let iters = self.tile_iterations(i, loop_index).unwrap_or(&[]);
            let color = self.tiles()[i]
                .color()
                .map_or_else(|| "-".to_owned(), |c| c.to_string());
            if iters.is_empty() {
                let _ = writeln!(out, "  {i:>4} | {color:>5} | {{}}");
                continue;
            }
            let shown = cap.min(iters.len());
            let body: Vec<String> = iters[..shown].iter().map(u32::to_string).collect();
            if iters.len() > shown {
                let _ = writeln!(
                    out,
                    "  {i:>4} | {color:>5} | {{{}, ..., {}}}",
                    body.join(", "),
                    iters[iters.len() - 1]
                );
            } else {
                let _ = writeln!(out, "  {i:>4} | {color:>5} | {{{}}}", body.join(", "));
            }
        }
    }
}
