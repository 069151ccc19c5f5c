use crate::algorithm::field::Field;
use anyhow::{Result, anyhow};

pub type Matrix = Vec<Vec<u8>>;

pub fn mul_vec_matrix<F: Field<Elem = u8>>(gf: &F, vec: &[u8], mat: &[Vec<u8>]) -> Result<Vec<u8>> {
    let k = mat.len();
    if k == 0 {
        return Err(anyhow!("Matrix cannot be empty"));
    }
    if vec.len() != k {
        return Err(anyhow!(
            "Vector length {} must match matrix rows {}",
            vec.len(),
            k
        ));
    }
    let cols = mat[0].len();
    if mat.iter().any(|r| r.len() != cols) {
        return Err(anyhow!("Matrix rows must all have the same length"));
    }

    let mut result = vec![gf.zero(); cols];
    for (j, out) in result.iter_mut().enumerate() {
        for (i, &v_val) in vec.iter().enumerate() {
            *out = gf.add(*out, gf.mul(v_val, mat[i][j]));
        }
    }
    Ok(result)
}

pub fn invert_matrix<F: Field<Elem = u8>>(gf: &F, mat: &[Vec<u8>]) -> Result<Matrix> {
    let n = mat.len();
    if n == 0 || mat.iter().any(|r| r.len() != n) {
        return Err(anyhow!("Matrix must be square"));
    }

    let mut aug = mat
        .iter()
        .enumerate()
        .map(|(r, src)| {
            let mut row = vec![gf.zero(); 2 * n];
            row[..n].copy_from_slice(src);
            row[n + r] = gf.one();
            row
        })
        .collect::<Vec<_>>();

    for col in 0..n {
        let pivot_row = (col..n)
            .find(|&r| aug[r][col] != gf.zero())
            .ok_or_else(|| anyhow!("Matrix is singular and cannot be inverted"))?;
        aug.swap(col, pivot_row);

        // Pivot is nonzero here, so the division is a true inverse.
        let inv_pivot = gf.div(gf.one(), aug[col][col]);
        for j in col..(2 * n) {
            aug[col][j] = gf.mul(inv_pivot, aug[col][j]);
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[row][col];
            if factor == gf.zero() {
                continue;
            }
            for j in col..(2 * n) {
                let prod = gf.mul(factor, aug[col][j]);
                aug[row][j] = gf.sub(aug[row][j], prod);
            }
        }
    }

    let inv = aug.into_iter().map(|row| row[n..].to_vec()).collect();
    Ok(inv)
}

/// `m x k` matrix whose row `r` holds the powers `(r + 1)^0 .. (r + 1)^(k - 1)`.
///
/// Row evaluation points must be distinct nonzero bytes, so `m` is at most 255.
pub fn build_vandermonde<F: Field<Elem = u8>>(gf: &F, k: usize, m: usize) -> Result<Matrix> {
    if m > 255 {
        return Err(anyhow!(
            "Vandermonde matrix supports at most 255 rows, requested {}",
            m
        ));
    }
    let mut matrix = vec![vec![gf.zero(); k]; m];
    for (r, row) in matrix.iter_mut().enumerate() {
        let x = (r + 1) as u8;
        let mut val = gf.one();
        for cell in row.iter_mut() {
            *cell = val;
            val = gf.mul(val, x);
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::gf256::Gf256;

    fn identity(n: usize) -> Matrix {
        (0..n)
            .map(|i| (0..n).map(|j| u8::from(i == j)).collect())
            .collect()
    }

    fn mul_matrix(gf: &Gf256, a: &[Vec<u8>], b: &[Vec<u8>]) -> Result<Matrix> {
        a.iter().map(|row| mul_vec_matrix(gf, row, b)).collect()
    }

    #[test]
    fn test_invert_roundtrip() -> Result<()> {
        let gf = Gf256::new();
        let mat = vec![vec![2, 3, 1], vec![1, 1, 4], vec![7, 0, 9]];
        let inv = invert_matrix(&gf, &mat)?;
        assert_eq!(mul_matrix(&gf, &mat, &inv)?, identity(3));
        assert_eq!(mul_matrix(&gf, &inv, &mat)?, identity(3));
        Ok(())
    }

    #[test]
    fn test_invert_identity() -> Result<()> {
        let gf = Gf256::new();
        assert_eq!(invert_matrix(&gf, &identity(4))?, identity(4));
        Ok(())
    }

    #[test]
    fn test_singular_matrix_inversion() {
        let gf = Gf256::new();
        let singular_matrix = vec![vec![1, 1], vec![2, 2]];
        assert!(invert_matrix(&gf, &singular_matrix).is_err());
    }

    #[test]
    fn test_non_square_rejected() {
        let gf = Gf256::new();
        assert!(invert_matrix(&gf, &[vec![1, 2, 3], vec![4, 5, 6]]).is_err());
        assert!(invert_matrix(&gf, &[]).is_err());
    }

    #[test]
    fn test_mul_vec_matrix_shape_errors() {
        let gf = Gf256::new();
        assert!(mul_vec_matrix(&gf, &[1, 2], &[vec![1, 2]]).is_err());
        assert!(mul_vec_matrix(&gf, &[], &[]).is_err());
    }

    #[test]
    fn test_vandermonde_rows_are_powers() -> Result<()> {
        let gf = Gf256::new();
        let v = build_vandermonde(&gf, 4, 3)?;
        assert_eq!(v.len(), 3);
        assert_eq!(v[0], vec![1, 1, 1, 1]);
        assert_eq!(v[1], vec![1, 2, 4, 8]);
        assert_eq!(v[2], vec![1, 3, 5, 15]);
        Ok(())
    }

    #[test]
    fn test_vandermonde_row_limit() -> Result<()> {
        let gf = Gf256::new();
        let v = build_vandermonde(&gf, 3, 255)?;
        assert_eq!(v[254], vec![1, 255, gf.mul(255, 255)]);
        assert!(build_vandermonde(&gf, 3, 256).is_err());
        assert!(build_vandermonde(&gf, 3, 258).is_err());
        Ok(())
    }

    #[test]
    fn test_vandermonde_square_invertible() -> Result<()> {
        let gf = Gf256::new();
        let v = build_vandermonde(&gf, 5, 5)?;
        let inv = invert_matrix(&gf, &v)?;
        assert_eq!(mul_matrix(&gf, &v, &inv)?, identity(5));
        Ok(())
    }
}
