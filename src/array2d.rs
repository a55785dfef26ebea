// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use std::fmt;
use std::ops::Index;
use std::ops::IndexMut;

/// column-major 2D array
///
/// Indexed by `(x, y)`: `x` selects a column (a contiguous vector of
/// `y_size` elements), `y` selects the element within that column.
///
/// Examples:
/// ```
/// # use primpoly::array2d::Array2D;
/// let mut array = Array2D::from_array(3, 2, vec![0, 1, 10, 11, 20, 21]);
/// assert_eq!(array[(1, 0)], 10);
/// assert_eq!(array.column(2), &[20, 21]);
/// array[(0, 1)] = 5;
/// assert_eq!(
///     format!("{}", array),
///     "[ 0  10  20 ]\n\
///      [ 5  11  21 ]"
/// );
/// ```
#[derive(Clone, Hash, Eq, PartialEq, Debug)]
pub struct Array2D<T> {
    x_size: usize,
    y_size: usize,
    data: Vec<T>,
}

impl<T> Array2D<T> {
    /// data is a column-major 2D array
    pub fn from_array(x_size: usize, y_size: usize, data: Vec<T>) -> Self {
        assert_eq!(x_size * y_size, data.len());
        Self {
            x_size,
            y_size,
            data,
        }
    }
    pub fn new_filled(x_size: usize, y_size: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_array(x_size, y_size, vec![value; x_size * y_size])
    }
    pub fn x_size(&self) -> usize {
        self.x_size
    }
    pub fn y_size(&self) -> usize {
        self.y_size
    }
    fn get_index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.x_size);
        assert!(y < self.y_size);
        x * self.y_size + y
    }
    pub fn column(&self, x: usize) -> &[T] {
        assert!(x < self.x_size);
        &self.data[x * self.y_size..(x + 1) * self.y_size]
    }
    pub fn column_mut(&mut self, x: usize) -> &mut [T] {
        assert!(x < self.x_size);
        &mut self.data[x * self.y_size..(x + 1) * self.y_size]
    }
    /// returns the column `source` (read-only) and the column `target`
    /// (mutable) at once; they must differ
    pub fn column_pair_mut(&mut self, source: usize, target: usize) -> (&[T], &mut [T]) {
        assert_ne!(source, target);
        let y_size = self.y_size;
        let (source_column, target_column) = if source < target {
            let (low, high) = self.data.split_at_mut(target * y_size);
            (&low[source * y_size..(source + 1) * y_size], &mut high[..y_size])
        } else {
            let (low, high) = self.data.split_at_mut(source * y_size);
            (&high[..y_size], &mut low[target * y_size..(target + 1) * y_size])
        };
        (source_column, target_column)
    }
}

impl<T> Index<(usize, usize)> for Array2D<T> {
    type Output = T;
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2D<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

impl<T: fmt::Display> fmt::Display for Array2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.x_size == 0 || self.y_size == 0 {
            return write!(f, "[x_size={}, y_size={}]", self.x_size, self.y_size);
        }
        let cells: Vec<String> = self.data.iter().map(ToString::to_string).collect();
        let col_widths: Vec<usize> = (0..self.x_size)
            .map(|x| {
                cells[x * self.y_size..(x + 1) * self.y_size]
                    .iter()
                    .map(String::len)
                    .max()
                    .unwrap_or(1)
            })
            .collect();
        for y in 0..self.y_size {
            if y != 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for x in 0..self.x_size {
                write!(
                    f,
                    " {cell:width$} ",
                    cell = cells[x * self.y_size + y],
                    width = col_widths[x]
                )?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_pair_mut() {
        let mut array = Array2D::from_array(3, 2, vec![1, 2, 3, 4, 5, 6]);
        {
            let (source, target) = array.column_pair_mut(2, 0);
            assert_eq!(source, &[5, 6]);
            target[0] += source[0];
            target[1] += source[1];
        }
        assert_eq!(array.column(0), &[6, 8]);
        {
            let (source, target) = array.column_pair_mut(0, 1);
            assert_eq!(source, &[6, 8]);
            target.copy_from_slice(source);
        }
        assert_eq!(array.column(1), &[6, 8]);
        assert_eq!(array.column(2), &[5, 6]);
    }

    #[test]
    fn test_display() {
        let array = Array2D::from_array(2, 2, vec![1, 100, 7, 3]);
        println!("{}", array);
        assert_eq!(format!("{}", array), "[ 1    7 ]\n[ 100  3 ]");
        let empty = Array2D::<i32>::from_array(0, 3, vec![]);
        assert_eq!(format!("{}", empty), "[x_size=0, y_size=3]");
    }
}
