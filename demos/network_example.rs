//! The f(x) = 2x task again, this time through the Network API.

use gradnet::matrix;
use gradnet::{mean_squared_error, Dense, Network};
use rand::rngs::StdRng;
use rand::SeedableRng;

const LEARNING_RATE: f32 = 0.1;
const EPOCHS: usize = 1000;

fn main() -> gradnet::Result<()> {
    let mut rng = StdRng::seed_from_u64(1);

    let mut network = Network::new();
    network.add_layer(Dense::new(1, 1, &mut rng)?);

    for epoch in 0..EPOCHS {
        let mut epoch_error = 0.0;

        for i in 0..10 {
            let x = i as f32 / 20.0;
            let input = matrix!([[x]]);
            let target = matrix!([[2.0 * x]]);

            let prediction = network.predict(&input)?;
            epoch_error += mean_squared_error(&prediction, &target)?;

            network.train(&input, &target, LEARNING_RATE)?;
        }

        if epoch % 100 == 0 {
            println!("EPOCH {epoch} | MSE: {:.6}", epoch_error / 10.0);
        }
    }

    println!("\n--- Final inference test ---");
    let test_input = 100.0f32;
    let output = network.predict(&matrix!([[test_input / 20.0]]))?;
    println!(
        "Input: {test_input:.2}, Output: {:.4}",
        output.data()[0] * 20.0
    );

    Ok(())
}
