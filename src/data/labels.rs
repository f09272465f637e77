use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

/// A classification label with a fixed, ordered set of classes.
pub trait ClassLabel: Clone + PartialEq + fmt::Debug {
    const CLASSES: usize;

    /// Position of this class in the output layer.
    fn index(&self) -> usize;

    /// Inverse of `index`; anything past the last class maps to the last class.
    fn from_index(index: usize) -> Self;

    fn one_hot(&self) -> Option<Vec<f64>> {
        one_hot(self.index(), Self::CLASSES)
    }

    /// Reads a network output as this label: the first position holding the
    /// largest value wins.
    fn from_output(output: &[f64]) -> Self {
        Self::from_index(first_max_index(output))
    }
}

/// A vector of `classes` zeros with a 1.0 at `index`; `None` if `index` is
/// not a valid class.
pub fn one_hot(index: usize, classes: usize) -> Option<Vec<f64>> {
    if index >= classes {
        return None;
    }
    let mut v = vec![0.0; classes];
    v[index] = 1.0;
    Some(v)
}

/// Index of the first maximum. Ties resolve to the earlier position.
pub fn first_max_index(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrisSpecies {
    Setosa,
    Versicolor,
    Virginica,
}

impl ClassLabel for IrisSpecies {
    const CLASSES: usize = 3;

    fn index(&self) -> usize {
        match self {
            IrisSpecies::Setosa => 0,
            IrisSpecies::Versicolor => 1,
            IrisSpecies::Virginica => 2,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => IrisSpecies::Setosa,
            1 => IrisSpecies::Versicolor,
            _ => IrisSpecies::Virginica,
        }
    }
}

impl FromStr for IrisSpecies {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Iris-setosa" => Ok(IrisSpecies::Setosa),
            "Iris-versicolor" => Ok(IrisSpecies::Versicolor),
            "Iris-virginica" => Ok(IrisSpecies::Virginica),
            other => Err(format!("unknown iris species '{other}'")),
        }
    }
}

impl fmt::Display for IrisSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IrisSpecies::Setosa => "Iris-setosa",
            IrisSpecies::Versicolor => "Iris-versicolor",
            IrisSpecies::Virginica => "Iris-virginica",
        };
        f.write_str(name)
    }
}

/// Wine cultivar, numbered 1 to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct WineClass(u8);

impl WineClass {
    pub fn new(class: u8) -> Option<WineClass> {
        (1..=3).contains(&class).then_some(WineClass(class))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for WineClass {
    type Error = String;

    fn try_from(class: u8) -> Result<Self, Self::Error> {
        WineClass::new(class).ok_or_else(|| format!("wine class {class} is outside 1..=3"))
    }
}

impl ClassLabel for WineClass {
    const CLASSES: usize = 3;

    fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }

    fn from_index(index: usize) -> Self {
        WineClass(index.min(2) as u8 + 1)
    }
}

impl FromStr for WineClass {
    type Err = String;

    /// Accepts `2` as well as `2.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse()
            .map_err(|_| format!("wine class '{}' is not a number", s.trim()))?;
        if value.fract() != 0.0 {
            return Err(format!("wine class {value} is not an integer"));
        }
        (1.0..=3.0).contains(&value)
            .then(|| WineClass(value as u8))
            .ok_or_else(|| format!("wine class {value} is outside 1..=3"))
    }
}

impl fmt::Display for WineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a three-way output vector to an iris species.
pub fn interpret_iris(output: &[f64]) -> IrisSpecies {
    IrisSpecies::from_output(output)
}

/// Maps a three-way output vector to a wine class.
pub fn interpret_wine(output: &[f64]) -> WineClass {
    WineClass::from_output(output)
}
