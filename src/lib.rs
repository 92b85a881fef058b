//! gradnet: a minimal feed-forward neural-network engine in Rust.
//!
//! Dense matrix algebra, a polymorphic layer abstraction, a network
//! container, and a plain gradient-descent training loop — enough to take a
//! single neuron or a small MNIST classifier from random weights to a
//! trained model, with every moving part visible.
//!
//! # Features
//!
//! - Row-major `f32` [`Matrix`] with the full small-network operation set.
//! - [`Dense`], [`Sigmoid`], and [`Relu`] layers behind one [`Layer`] trait.
//! - [`Network`] pipeline with `predict` and a one-call `train` step.
//! - Signaled errors for every shape or usage violation; no panics on
//!   misuse paths.
//! - Reproducible initialization through caller-supplied RNGs.
//!
//! # Goals
//!
//! - Prioritize correctness and explicitness over black-box abstraction.
//! - Keep ownership of every intermediate tensor obvious: one owner per
//!   buffer, caches replaced and released on each forward pass.
//! - Stay small enough to read in one sitting.
//!
//! # Modules
//!
//! - [`matrix`] — dense 2-D buffer and its operations.
//! - [`layer`] — the layer trait and the three built-in kinds.
//! - [`network`] — layer pipeline, prediction, and the training step.
//! - [`loss`] — mean-squared-error helper for monitoring loops.
//! - [`error`] — the error taxonomy.
//!
//! # Example
//!
//! ```rust
//! use gradnet::{Dense, Matrix, Network, Relu, Sigmoid};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let mut network = Network::new();
//! network.add_layer(Dense::new(4, 8, &mut rng)?);
//! network.add_layer(Relu::new());
//! network.add_layer(Dense::new(8, 2, &mut rng)?);
//! network.add_layer(Sigmoid::new());
//!
//! let input = Matrix::from_vec(4, 1, vec![0.1, 0.9, 0.4, 0.0])?;
//! let target = Matrix::from_vec(2, 1, vec![1.0, 0.0])?;
//!
//! network.train(&input, &target, 0.1)?;
//! let prediction = network.predict(&input)?;
//! assert_eq!(prediction.shape(), (2, 1));
//! # Ok::<(), gradnet::Error>(())
//! ```

pub mod error;
pub mod layer;
pub mod loss;
pub mod matrix;
pub mod network;

pub use error::{Error, Result};
pub use layer::{Dense, Layer, LayerKind, Relu, Sigmoid};
pub use loss::mean_squared_error;
pub use matrix::Matrix;
pub use network::Network;
