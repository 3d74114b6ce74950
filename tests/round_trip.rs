use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128Plus;
use wasm_bitset::BitSet;

const ROUNDS: usize = 200;

fn random_bits(rng: &mut Xoshiro128Plus, len: usize) -> String {
    (0..len)
        .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
        .collect()
}

#[test]
fn bytes_round_trip() {
    let mut rng = Xoshiro128Plus::seed_from_u64(0x5eed);
    for _ in 0..ROUNDS {
        let len = rng.random_range(0..40);
        let bytes: Vec<u8> = (0..len).map(|_| rng.random()).collect();
        let bit_set = BitSet::from_bytes(&bytes);
        assert_eq!(bit_set.len(), len * 8);
        assert_eq!(bit_set.to_bytes(), bytes);
    }
}

#[test]
fn binary_string_round_trip() {
    let mut rng = Xoshiro128Plus::seed_from_u64(1);
    for _ in 0..ROUNDS {
        let len = rng.random_range(0..150);
        let text = random_bits(&mut rng, len);
        let bit_set = BitSet::from_binary_string(&text).unwrap();
        assert_eq!(bit_set.len(), len);
        assert_eq!(bit_set.to_binary_string(), text);
        let bits: String = bit_set
            .iter()
            .map(|bit| if bit { '1' } else { '0' })
            .collect();
        assert_eq!(bits, text);
    }
}

#[test]
fn growth_reads_zero_after_shrink() {
    let mut rng = Xoshiro128Plus::seed_from_u64(2);
    for _ in 0..ROUNDS {
        let len = rng.random_range(1..150);
        let text = random_bits(&mut rng, len);
        let mut bit_set = BitSet::from_binary_string(&text).unwrap();

        let shrunk = rng.random_range(0..len);
        bit_set.resize(shrunk);
        assert_eq!(bit_set.to_binary_string(), text[..shrunk]);

        let grown = rng.random_range(len..len + 100);
        bit_set.resize(grown);
        assert_eq!(bit_set.len(), grown);
        assert_eq!(bit_set.to_binary_string()[..shrunk], text[..shrunk]);
        assert!((shrunk..grown).all(|index| bit_set.get(index) == Some(0)));
    }
}

#[test]
fn set_reports_changes() {
    let mut rng = Xoshiro128Plus::seed_from_u64(3);
    let mut bit_set = BitSet::new();
    let mut model: Vec<bool> = Vec::new();
    for _ in 0..ROUNDS * 5 {
        let index = rng.random_range(0..100);
        let value = rng.random_bool(0.5);
        let expected = match model.get(index) {
            Some(&old) => old != value,
            None => {
                model.resize(index + 1, false);
                true
            }
        };
        model[index] = value;
        assert_eq!(bit_set.set_bool(index, value), expected);
        assert_eq!(bit_set.len(), model.len());
    }
    assert!(
        model
            .iter()
            .enumerate()
            .all(|(index, &bit)| bit_set.get_bool(index) == Some(bit))
    );
}

#[test]
fn slice_matches_substring() {
    let mut rng = Xoshiro128Plus::seed_from_u64(4);
    for _ in 0..ROUNDS {
        let len = rng.random_range(2..100);
        let text = random_bits(&mut rng, len);
        let bit_set = BitSet::from_binary_string(&text).unwrap();

        let start = rng.random_range(0..len - 1);
        let end = rng.random_range(start + 1..len + 40);
        let slice = bit_set.slice(start, Some(end)).unwrap();
        assert_eq!(slice.len(), end - start + 1);

        let real = &text[start..len.min(end + 1)];
        let expected = format!("{real:0<width$}", width = end - start + 1);
        assert_eq!(slice.to_binary_string(), expected);
    }
}

#[test]
fn number_round_trip() {
    let mut rng = Xoshiro128Plus::seed_from_u64(5);
    for _ in 0..ROUNDS {
        let width = rng.random_range(1..=64);
        let value = rng.random::<u64>() >> (64 - width);
        let offset = rng.random_range(0..20);
        let mut bit_set = BitSet::new();
        bit_set.set_number(offset, value, width).unwrap();
        assert_eq!(bit_set.len(), offset + width);
        assert_eq!(bit_set.to_number(), Some(value));
        assert_eq!(
            bit_set.slice(offset, None).map(|s| s.len()),
            (width > 1).then_some(width)
        );
    }
}
