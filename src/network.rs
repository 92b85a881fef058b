//! Network container: an ordered pipeline of layers with a training step.
//!
//! A [`Network`] owns its layers and composes them into a strict
//! feed-forward pipeline — forward left-to-right for prediction, backward
//! right-to-left for training. There is no branching and no partial-failure
//! recovery: the first error anywhere aborts the whole operation and
//! propagates to the caller, so an absent result can never flow further
//! down the pipeline.

use log::{debug, trace};

use crate::error::Result;
use crate::layer::Layer;
use crate::matrix::Matrix;

/// An ordered sequence of layers; insertion order is forward execution
/// order.
///
/// Dropping a network drops every contained layer along with its parameters
/// and cached state.
///
/// # Example
/// ```rust
/// use gradnet::{Dense, Matrix, Network, Relu};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut network = Network::new();
/// network.add_layer(Dense::new(2, 3, &mut rng)?);
/// network.add_layer(Relu::new());
///
/// let input = Matrix::from_vec(2, 1, vec![0.5, -0.25])?;
/// let output = network.predict(&input)?;
/// assert_eq!(output.shape(), (3, 1));
/// # Ok::<(), gradnet::Error>(())
/// ```
#[derive(Default)]
pub struct Network {
    layers: Vec<Box<dyn Layer>>,
}

impl Network {
    /// Creates an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a layer to the end of the pipeline.
    pub fn add_layer<L: Layer + 'static>(&mut self, layer: L) {
        debug!("adding layer {}", layer.describe());
        self.layers.push(Box::new(layer));
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the network has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Runs a forward pass through every layer in order and returns the
    /// final output, owned by the caller.
    ///
    /// An empty network is the identity: it returns a fresh copy of the
    /// input. Each intermediate result is dropped as soon as the next layer
    /// has consumed it.
    ///
    /// # Errors
    /// Propagates the first layer failure; no partial output is returned.
    pub fn predict(&mut self, input: &Matrix) -> Result<Matrix> {
        let Some((first, rest)) = self.layers.split_first_mut() else {
            return Ok(input.clone());
        };

        trace!("forward {}", first.describe());
        let mut output = first.forward(input)?;
        for layer in rest {
            trace!("forward {}", layer.describe());
            output = layer.forward(&output)?;
        }
        Ok(output)
    }

    /// Performs one training step: forward pass, loss gradient
    /// `prediction - target`, then a backward walk updating every layer's
    /// parameters with step size `learning_rate`.
    ///
    /// The gradient emerging upstream of the first layer has no consumer
    /// and is discarded.
    ///
    /// # Errors
    /// [`Error::DimensionMismatch`](crate::Error::DimensionMismatch) if
    /// `target` does not match the prediction's shape; any layer failure
    /// aborts the step.
    pub fn train(&mut self, input: &Matrix, target: &Matrix, learning_rate: f32) -> Result<()> {
        let prediction = self.predict(input)?;
        let mut gradient = prediction.subtract(target)?;

        debug!("backward pass over {} layers", self.layers.len());
        for layer in self.layers.iter_mut().rev() {
            gradient = layer.backward(&gradient, learning_rate)?;
        }
        Ok(())
    }

    /// One line per layer, in forward order.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("Network ({} layers)\n", self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            out.push_str(&format!("  {i}: {}\n", layer.describe()));
        }
        out
    }
}
