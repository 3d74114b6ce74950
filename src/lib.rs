use wasm_bindgen::prelude::*;

mod bit_set;
mod parse;
mod serialize;

pub use bit_set::BitSet;

// Largest integer a JS number holds exactly, `Number.MAX_SAFE_INTEGER`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// JavaScript face of [`BitSet`].
///
/// Indices coming from JS may be negative; reads and slices treat those as
/// out of range, writes ignore them and report no change, `resize` treats
/// them as 0.
#[wasm_bindgen(js_name = BitSet)]
#[derive(Default)]
pub struct JsBitSet {
    inner: BitSet,
}

impl From<BitSet> for JsBitSet {
    fn from(inner: BitSet) -> Self {
        Self { inner }
    }
}

#[wasm_bindgen(js_class = BitSet)]
impl JsBitSet {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = fromBinaryString)]
    #[allow(clippy::missing_errors_doc)]
    pub fn from_binary_string(text: &str) -> Result<JsBitSet, JsValue> {
        BitSet::from_binary_string(text)
            .map(Self::from)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse bits: {e}")))
    }

    #[wasm_bindgen(js_name = fromUint8Array)]
    #[must_use]
    pub fn from_uint8_array(bytes: &[u8]) -> JsBitSet {
        BitSet::from_bytes(bytes).into()
    }

    #[wasm_bindgen(js_name = fromJSON)]
    #[allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]
    pub fn from_json(value: JsValue) -> Result<JsBitSet, JsValue> {
        serde_wasm_bindgen::from_value::<BitSet>(value)
            .map(Self::from)
            .map_err(|e| JsValue::from_str(&format!("Failed to deserialize bits: {e}")))
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    pub fn resize(&mut self, size: isize) {
        self.inner.resize(usize::try_from(size).unwrap_or(0));
    }

    #[must_use]
    pub fn get(&self, index: isize) -> Option<u8> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.inner.get(index))
    }

    #[wasm_bindgen(js_name = getBoolean)]
    #[must_use]
    pub fn get_boolean(&self, index: isize) -> Option<bool> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.inner.get_bool(index))
    }

    pub fn set(&mut self, index: isize, value: Option<u8>) -> bool {
        usize::try_from(index).is_ok_and(|index| self.inner.set(index, value.unwrap_or(1)))
    }

    #[wasm_bindgen(js_name = setBoolean)]
    pub fn set_boolean(&mut self, index: isize, value: Option<bool>) -> bool {
        usize::try_from(index)
            .is_ok_and(|index| self.inner.set_bool(index, value.unwrap_or(true)))
    }

    #[wasm_bindgen(js_name = setBinaryString)]
    #[allow(clippy::missing_errors_doc)]
    pub fn set_binary_string(&mut self, offset: usize, text: &str) -> Result<(), JsValue> {
        self.inner
            .set_binary_string(offset, text)
            .map_err(|e| JsValue::from_str(&format!("Failed to set bits: {e}")))
    }

    #[wasm_bindgen(js_name = setNumber)]
    #[allow(clippy::missing_errors_doc)]
    pub fn set_number(
        &mut self,
        offset: usize,
        value: f64,
        bit_size: usize,
    ) -> Result<(), JsValue> {
        if !(value.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(&value)) {
            return Err(JsValue::from_str(&format!(
                "Failed to set number: {value} is not a non-negative safe integer"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = value as u64;
        self.inner
            .set_number(offset, value, bit_size)
            .map_err(|e| JsValue::from_str(&format!("Failed to set number: {e}")))
    }

    #[wasm_bindgen(js_name = setUint8Array)]
    pub fn set_uint8_array(&mut self, offset: usize, bytes: &[u8]) {
        self.inner.set_bytes(offset, bytes);
    }

    #[wasm_bindgen(js_name = setUtf8String)]
    pub fn set_utf8_string(&mut self, offset: usize, text: &str) {
        self.inner.set_utf8_string(offset, text);
    }

    #[wasm_bindgen(js_name = setUtf16String)]
    pub fn set_utf16_string(&mut self, offset: usize, text: &str) {
        self.inner.set_utf16_string(offset, text);
    }

    #[must_use]
    pub fn slice(&self, start: isize, end: Option<isize>) -> Option<JsBitSet> {
        let start = usize::try_from(start).ok()?;
        let end = end.map(usize::try_from).transpose().ok()?;
        self.inner.slice(start, end).map(Self::from)
    }

    #[wasm_bindgen(js_name = toBinaryString)]
    #[must_use]
    pub fn to_binary_string(&self) -> String {
        self.inner.to_binary_string()
    }

    #[wasm_bindgen(js_name = toUint8Array)]
    #[must_use]
    pub fn to_uint8_array(&self) -> Vec<u8> {
        self.inner.to_bytes()
    }

    /// Same as `parseInt(bits, 2)`: exact up to 2^53, rounded beyond.
    #[wasm_bindgen(js_name = toNumber)]
    #[must_use]
    pub fn to_number(&self) -> f64 {
        self.inner
            .iter()
            .fold(0.0, |acc, bit| acc * 2.0 + f64::from(u8::from(bit)))
    }

    #[wasm_bindgen(js_name = toJSON)]
    #[allow(clippy::missing_errors_doc)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize bits: {e}")))
    }
}
