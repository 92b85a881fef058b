//! Randomize two matrices and print their product.

use gradnet::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> gradnet::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let mut m1 = Matrix::new(3, 2)?;
    let mut m2 = Matrix::new(2, 3)?;
    m1.randomize(&mut rng);
    m2.randomize(&mut rng);

    println!("{m1}\n");
    println!("{m2}\n");

    let product = m1.multiply(&m2)?;
    println!("{product}");

    Ok(())
}
