use rand::Rng;

/// Random components of the cost model, one pair of draws per order.
pub trait CostSampler {
    /// Fixed handling surcharge of the main warehouse, in `[500, 2000)`.
    fn warehouse_surcharge(&mut self) -> f64;
    /// Noise added to the RDC cost, in `[-200, 200)`.
    fn rdc_adjustment(&mut self) -> f64;
}

pub struct RngCostSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RngCostSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CostSampler for RngCostSampler<R> {
    fn warehouse_surcharge(&mut self) -> f64 {
        self.rng.gen_range(500..2000) as f64
    }

    fn rdc_adjustment(&mut self) -> f64 {
        self.rng.gen_range(-200..200) as f64
    }
}
