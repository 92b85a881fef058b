//! Train a single dense unit on f(x) = 2x, driving the layer directly.

use gradnet::matrix;
use gradnet::{Dense, Layer};
use rand::rngs::StdRng;
use rand::SeedableRng;

const LEARNING_RATE: f32 = 0.1;
const EPOCHS: usize = 1000;

fn main() -> gradnet::Result<()> {
    let mut rng = StdRng::seed_from_u64(1);
    let mut dense = Dense::new(1, 1, &mut rng)?;

    println!("Training started (target: f(x) = 2x)...");

    for epoch in 0..EPOCHS {
        let mut epoch_error = 0.0;

        for i in 0..10 {
            let x = i as f32 / 20.0;
            let input = matrix!([[x]]);
            let target = matrix!([[2.0 * x]]);

            let prediction = dense.forward(&input)?;
            let loss_gradient = prediction.subtract(&target)?;
            epoch_error += loss_gradient.data()[0] * loss_gradient.data()[0];

            let _upstream = dense.backward(&loss_gradient, LEARNING_RATE)?;
        }

        if epoch % 100 == 0 {
            println!("EPOCH {epoch} | MSE: {:.6}", epoch_error / 10.0);
        }
    }

    println!("\n--- Final inference test ---");
    let test_input = 123.0f32;
    let out = dense.forward(&matrix!([[test_input / 20.0]]))?;
    let result = out.data()[0] * 20.0;

    println!("Input: {test_input:.0}");
    println!("Predicted: {result:.4} (expected: {:.4})", test_input * 2.0);
    println!("Learned weight: {:.4}", dense.weights().data()[0]);
    println!("Learned bias: {:.4}", dense.bias().data()[0]);

    Ok(())
}
