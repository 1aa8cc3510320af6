//! This is the vector math module
//! Provide elementwise arithmetic, L2 normalization and dot product

/// L2 Normalization
/// norm_vec = vec / ||vec||
/// Zero vector cannot be normalized
pub fn l2_norm(vector: &[f32]) -> Result<Vec<f32>, String> {
    if vector.is_empty() {
        return Err("Cannot normalize an empty vector".to_string());
    }

    let norm = vector.iter()
        .map(|x| x * x)
        .sum::<f32>()
        .sqrt();

    if norm == 0.0 {
        return Err("Cannot normalize a zero vector".to_string());
    }

    let normed_vec = vector.iter()
        .map(|x| x / norm)
        .collect();

    Ok(normed_vec)
}

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) for i = 0..a.len()
/// Can only process vectors with same dimensions
pub fn dot_product(left: &[f32], right: &[f32]) -> Result<f32, String> {
    if left.len() != right.len() {
        return Err("Different dimensions".to_string());
    }

    let dot_prod = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum();

    Ok(dot_prod)
}

/// Elementwise addition
/// out[i] = a[i] + b[i]
/// Can only process vectors with same dimensions
pub fn add(left: &[f32], right: &[f32]) -> Result<Vec<f32>, String> {
    if left.len() != right.len() {
        return Err("Different dimensions".to_string());
    }

    let sum_vec = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x + y)
        .collect();

    Ok(sum_vec)
}

/// Elementwise subtraction
/// out[i] = a[i] - b[i]
/// Can only process vectors with same dimensions
pub fn sub(left: &[f32], right: &[f32]) -> Result<Vec<f32>, String> {
    if left.len() != right.len() {
        return Err("Different dimensions".to_string());
    }

    let diff_vec = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x - y)
        .collect();

    Ok(diff_vec)
}

/// Elementwise multiplication
/// out[i] = a[i] * b[i]
/// Can only process vectors with same dimensions
pub fn mul(left: &[f32], right: &[f32]) -> Result<Vec<f32>, String> {
    if left.len() != right.len() {
        return Err("Different dimensions".to_string());
    }

    let prod_vec = left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .collect();

    Ok(prod_vec)
}
