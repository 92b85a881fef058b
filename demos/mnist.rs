//! MNIST digit classifier: 784 -> 128 ReLU -> 10 Sigmoid.
//!
//! Downloads the IDX-format dataset on first run, trains for a few epochs
//! of per-sample gradient descent, then reports test accuracy, a confusion
//! matrix, and a handful of demo predictions. All file handling stays in
//! this driver; the engine only ever sees pre-shaped matrices.

use std::fs::{create_dir_all, File};
use std::io::{copy, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use gradnet::{mean_squared_error, Dense, Matrix, Network, Relu, Sigmoid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::blocking::get;

const BASE_URL: &str = "https://storage.googleapis.com/cvdf-datasets/mnist";

const INPUT_SIZE: usize = 784;
const HIDDEN_SIZE: usize = 128;
const OUTPUT_SIZE: usize = 10;

const LEARNING_RATE: f32 = 0.01;
const TRAIN_SAMPLES: usize = 5000;
const TEST_SAMPLES: usize = 1000;
const EPOCHS: usize = 10;

fn download_and_extract(name: &str, output_path: &str) {
    let url = format!("{BASE_URL}/{name}.gz");
    let resp = get(&url).expect("failed to fetch URL");
    if !resp.status().is_success() {
        panic!("failed to download {url}: HTTP {}", resp.status());
    }

    let mut decoder = GzDecoder::new(resp);
    let mut out = File::create(output_path).expect("failed to create file");
    copy(&mut decoder, &mut out).expect("failed to decompress");
}

fn load_images(path: &str) -> Vec<Vec<f32>> {
    let mut f = File::open(path).unwrap();
    let mut buf = vec![];
    f.read_to_end(&mut buf).unwrap();
    assert_eq!(&buf[0..4], &[0, 0, 8, 3]);

    let count = u32::from_be_bytes(buf[4..8].try_into().unwrap()) as usize;
    let rows = u32::from_be_bytes(buf[8..12].try_into().unwrap()) as usize;
    let cols = u32::from_be_bytes(buf[12..16].try_into().unwrap()) as usize;

    let mut images = Vec::with_capacity(count);
    for i in 0..count {
        let start = 16 + i * rows * cols;
        let end = start + rows * cols;
        let img: Vec<f32> = buf[start..end].iter().map(|&b| b as f32 / 255.0).collect();
        images.push(img);
    }
    images
}

fn load_labels(path: &str) -> Vec<u8> {
    let mut f = File::open(path).unwrap();
    let mut buf = vec![];
    f.read_to_end(&mut buf).unwrap();
    assert_eq!(&buf[0..4], &[0, 0, 8, 1]);

    let count = u32::from_be_bytes(buf[4..8].try_into().unwrap()) as usize;
    buf[8..8 + count].to_vec()
}

fn one_hot(label: u8) -> Vec<f32> {
    let mut target = vec![0.0; OUTPUT_SIZE];
    target[label as usize] = 1.0;
    target
}

fn fetch_dataset() {
    create_dir_all("mnist_data").unwrap();
    let files = [
        "train-images-idx3-ubyte",
        "train-labels-idx1-ubyte",
        "t10k-images-idx3-ubyte",
        "t10k-labels-idx1-ubyte",
    ];
    for name in files {
        let path = format!("mnist_data/{name}");
        if !Path::new(&path).exists() {
            println!("Downloading {name}...");
            download_and_extract(name, &path);
        }
    }
}

fn main() -> gradnet::Result<()> {
    env_logger::init();

    println!("=== MNIST Neural Network Training ===\n");
    println!("Network architecture: {INPUT_SIZE} -> {HIDDEN_SIZE} -> {OUTPUT_SIZE}");
    println!("Learning rate: {LEARNING_RATE}");
    println!("Training samples: {TRAIN_SAMPLES}, test samples: {TEST_SAMPLES}");
    println!("Epochs: {EPOCHS}\n");

    fetch_dataset();
    let train_images = load_images("mnist_data/train-images-idx3-ubyte");
    let train_labels = load_labels("mnist_data/train-labels-idx1-ubyte");
    let test_images = load_images("mnist_data/t10k-images-idx3-ubyte");
    let test_labels = load_labels("mnist_data/t10k-labels-idx1-ubyte");

    let mut rng = StdRng::seed_from_u64(42);
    let mut network = Network::new();
    network.add_layer(Dense::new(INPUT_SIZE, HIDDEN_SIZE, &mut rng)?);
    network.add_layer(Relu::new());
    network.add_layer(Dense::new(HIDDEN_SIZE, OUTPUT_SIZE, &mut rng)?);
    network.add_layer(Sigmoid::new());
    print!("{}", network.summary());

    println!("\n--- Training phase ---");
    for epoch in 0..EPOCHS {
        let mut correct = 0usize;
        let mut total_loss = 0.0f32;

        for (sample, (pixels, &label)) in train_images
            .iter()
            .zip(&train_labels)
            .take(TRAIN_SAMPLES)
            .enumerate()
        {
            let input = Matrix::from_vec(INPUT_SIZE, 1, pixels.clone())?;
            let target = Matrix::from_vec(OUTPUT_SIZE, 1, one_hot(label))?;

            let prediction = network.predict(&input)?;
            if prediction.argmax() == label as usize {
                correct += 1;
            }
            total_loss += mean_squared_error(&prediction, &target)?;

            network.train(&input, &target, LEARNING_RATE)?;

            if (sample + 1) % 1000 == 0 {
                println!(
                    "  Epoch {}: processed {}/{} samples...",
                    epoch + 1,
                    sample + 1,
                    TRAIN_SAMPLES
                );
            }
        }

        let accuracy = correct as f32 / TRAIN_SAMPLES as f32 * 100.0;
        println!(
            "Epoch {}/{} - train accuracy: {accuracy:.2}% - avg loss: {:.4}",
            epoch + 1,
            EPOCHS,
            total_loss / TRAIN_SAMPLES as f32
        );
    }

    println!("\n--- Testing phase ---");
    let mut test_correct = 0usize;
    let mut confusion = [[0usize; OUTPUT_SIZE]; OUTPUT_SIZE];

    for (pixels, &label) in test_images.iter().zip(&test_labels).take(TEST_SAMPLES) {
        let input = Matrix::from_vec(INPUT_SIZE, 1, pixels.clone())?;
        let prediction = network.predict(&input)?;
        let predicted = prediction.argmax();

        confusion[label as usize][predicted] += 1;
        if predicted == label as usize {
            test_correct += 1;
        }
    }

    println!("\n=== Results ===");
    println!(
        "Test accuracy: {test_correct}/{TEST_SAMPLES} = {:.2}%",
        test_correct as f32 / TEST_SAMPLES as f32 * 100.0
    );

    println!("\nPer-digit accuracy:");
    for digit in 0..OUTPUT_SIZE {
        let total: usize = confusion[digit].iter().sum();
        if total > 0 {
            let correct = confusion[digit][digit];
            println!(
                "  Digit {digit}: {correct}/{total} ({:.1}%)",
                correct as f32 / total as f32 * 100.0
            );
        }
    }

    println!("\n--- Demo: single sample predictions ---");
    for (i, (pixels, &label)) in test_images.iter().zip(&test_labels).take(5).enumerate() {
        let input = Matrix::from_vec(INPUT_SIZE, 1, pixels.clone())?;
        let predicted = network.predict(&input)?.argmax();
        let mark = if predicted == label as usize { "ok" } else { "x" };
        println!(
            "  Sample {}: true label = {label}, predicted = {predicted} {mark}",
            i + 1
        );
    }

    println!("\nDone!");
    Ok(())
}
