use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devkit_core::digest::{self, Algorithm, HashOutput};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct HashOptions {
    /// Text to hash (read from stdin when omitted or `-`)
    text: Option<String>,

    /// Hash the bytes of this file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<String>,

    /// Only compute this algorithm (default: all of them)
    #[arg(short, long)]
    algorithm: Option<AlgorithmArg>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmArg {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Md5 => Algorithm::Md5,
            AlgorithmArg::Sha1 => Algorithm::Sha1,
            AlgorithmArg::Sha256 => Algorithm::Sha256,
            AlgorithmArg::Sha384 => Algorithm::Sha384,
            AlgorithmArg::Sha512 => Algorithm::Sha512,
        }
    }
}

pub fn hash_data(bytes: &[u8], algorithm: Option<Algorithm>) -> Vec<HashOutput> {
    match algorithm {
        Some(algorithm) => vec![HashOutput {
            algorithm,
            digest: digest::hash(algorithm, bytes),
        }],
        None => digest::hash_all(bytes),
    }
}

pub fn run(options: HashOptions, global: crate::Global) -> Result<()> {
    let bytes = match &options.file {
        Some(path) => read_bytes(path)?,
        None => read_input(options.text.clone())?.into_bytes(),
    };

    if global.verbose {
        eprintln!("Hashing {} bytes", bytes.len());
    }

    let hashes = hash_data(&bytes, options.algorithm.map(Algorithm::from));

    if options.json {
        return print_json(&hashes);
    }

    if let [single] = hashes.as_slice() {
        println!("{}", single.digest);
        return Ok(());
    }

    let tty = is_tty();
    let mut table = new_table();
    for hash in &hashes {
        let name = if tty {
            hash.algorithm.to_string().cyan().to_string()
        } else {
            hash.algorithm.to_string()
        };
        table.add_row(prettytable::row![name, hash.digest]);
    }
    table.printstd();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_data_single() {
        let hashes = hash_data(b"abc", Some(Algorithm::Md5));
        assert_eq!(hashes.len(), 1);
        assert_eq!(hashes[0].digest, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_hash_data_all() {
        let hashes = hash_data(b"abc", None);
        assert_eq!(hashes.len(), Algorithm::ALL.len());
        assert_eq!(hashes[1].algorithm, Algorithm::Sha1);
        assert_eq!(hashes[1].digest, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }
}
