//! The model module
//! Provide the vocabulary store, the ranking engine and the query facade

use crate::rank::{WordDist, by_score_desc, sorted_insert};
use crate::vector::{add, dot_product, l2_norm, sub};
use serde::{Serialize, Deserialize};
use std:: {
    fs::File,
    io::{
        BufReader,
        BufWriter,
    }
};

/// A word label paired with its embedding.
///
/// The label is empty for derived vectors (an analogy's combined vector).
/// Vectors are immutable once built; arithmetic allocates new ones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WordVector {
    pub word: String,
    pub values: Vec<f32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Model {
    vocab: Vec<WordVector>,
    dimension: Option<usize>,
}

impl Model {
    /// Creates a new empty model.
    ///
    /// An empty model resolves no words; every query returns empty results.
    /// Use [`from_entries`](Model::from_entries) or the parsing adapter to
    /// build a usable vocabulary.
    pub fn new() -> Model {
        Model { vocab: Vec::new(), dimension: None }
    }

    /// Builds a model from raw `(word, vector)` entries.
    ///
    /// Every vector is L2-normalized before storage, so dot products against
    /// stored vectors are cosine similarities. All entries must share one
    /// dimension; words may repeat (lookups return the first occurrence).
    /// The vocabulary is read-only after construction.
    ///
    /// # Arguments
    ///
    /// * `entries` - Ordered `(word, raw vector)` pairs from the parsing collaborator
    ///
    /// # Returns
    ///
    /// * `Ok(Model)` - The built model
    /// * `Err(String)` - Error on a dimension mismatch or a zero/empty vector
    ///
    /// # Examples
    ///
    /// ```
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    ///     ("dog".to_string(), vec![0.0, 1.0, 0.0]),
    /// ]).unwrap();
    /// assert_eq!(model.count(), 2);
    /// assert_eq!(model.dimension(), Some(3));
    ///
    /// // Mismatched dimensions are rejected
    /// let result = Model::from_entries(vec![
    ///     ("a".to_string(), vec![1.0, 0.0]),
    ///     ("b".to_string(), vec![1.0, 0.0, 0.0]),
    /// ]);
    /// assert!(result.is_err());
    /// ```
    pub fn from_entries(entries: Vec<(String, Vec<f32>)>) -> Result<Model, String> {
        let mut vocab = Vec::with_capacity(entries.len());
        let mut dimension = None;

        for (word, values) in entries {
            let dim = values.len();
            match dimension {
                None => {
                    dimension = Some(dim);
                }
                Some(d) => {
                    if dim != d {
                        return Err(format!("Different dimension for word '{}'", word));
                    }
                }
            }

            let normed = l2_norm(&values)
                .map_err(|e| format!("Cannot load word '{}': {}", word, e))?;
            vocab.push(WordVector { word, values: normed });
        }

        Ok(Model { vocab, dimension })
    }

    /// Looks up a word by exact match.
    ///
    /// Returns the first occurrence in vocabulary order, or `None` if the
    /// word is out of vocabulary.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    /// ]).unwrap();
    ///
    /// assert!(model.lookup("cat").is_some());
    /// assert!(model.lookup("ghost").is_none());
    /// ```
    pub fn lookup(&self, word: &str) -> Option<&WordVector> {
        self.vocab.iter().find(|wv| wv.word == word)
    }

    /// Looks up many words in a single pass over the vocabulary.
    ///
    /// The result preserves the order and length of `words`; unresolved
    /// slots are `None`. A slot is never overwritten once filled, so the
    /// first vocabulary occurrence wins, consistent with [`lookup`](Model::lookup).
    ///
    /// # Examples
    ///
    /// ```
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    ///     ("dog".to_string(), vec![0.0, 1.0, 0.0]),
    /// ]).unwrap();
    ///
    /// let vectors = model.lookup_batch(&["cat", "ghost", "dog"]);
    /// assert_eq!(vectors.len(), 3);
    /// assert!(vectors[0].is_some());
    /// assert!(vectors[1].is_none());
    /// assert!(vectors[2].is_some());
    /// ```
    pub fn lookup_batch(&self, words: &[&str]) -> Vec<Option<&WordVector>> {
        self.lookup_batch_indices(words)
            .into_iter()
            .map(|index| index.map(|i| &self.vocab[i]))
            .collect()
    }

    /// Single-pass batch resolution to vocabulary indices.
    ///
    /// Indices are the stable identity used for exclusion during ranking:
    /// two distinct words with identical values stay distinguishable.
    fn lookup_batch_indices(&self, words: &[&str]) -> Vec<Option<usize>> {
        let mut indices = vec![None; words.len()];

        for (vocab_index, wv) in self.vocab.iter().enumerate() {
            for (slot, word) in words.iter().enumerate() {
                if indices[slot].is_none() && wv.word == *word {
                    indices[slot] = Some(vocab_index);
                }
            }
        }

        indices
    }

    /// Cosine similarity between two words.
    ///
    /// Literally equal words score `1.0` without touching the vocabulary.
    /// If either word is out of vocabulary there is no score.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    ///     ("dog".to_string(), vec![0.0, 1.0, 0.0]),
    /// ]).unwrap();
    ///
    /// assert_eq!(model.similarity("cat", "cat"), Some(1.0));
    /// assert_eq!(model.similarity("cat", "dog"), Some(0.0));
    /// assert_eq!(model.similarity("cat", "ghost"), None);
    /// ```
    pub fn similarity(&self, word1: &str, word2: &str) -> Option<f32> {
        if word1 == word2 {
            return Some(1.0);
        }

        let v1 = self.lookup(word1)?;
        let v2 = self.lookup(word2)?;

        // Stored vectors share one dimension
        Some(dot_product(&v1.values, &v2.values).unwrap())
    }

    /// Scans the vocabulary once and ranks the top `n` neighbors per query.
    ///
    /// Absent query positions produce empty lists and are skipped during the
    /// scan. Present queries are re-normalized once up front; each candidate
    /// is scored by dot product against the stored unit vectors. Candidates
    /// whose vocabulary index is in `exclude` never rank, and a candidate
    /// whose word equals a query's label is skipped for that query.
    ///
    /// Lists are maintained incrementally: once a list holds `n` entries,
    /// candidates scoring at or below its tail are rejected without
    /// insertion. Equal scores keep vocabulary order. A final stable sort
    /// guarantees the descending invariant on every returned list.
    ///
    /// # Arguments
    ///
    /// * `queries` - Optional query vectors, one result list per position
    /// * `n` - Result cap per query
    /// * `exclude` - Vocabulary indices barred from candidacy
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Vec<WordDist>>)` - One descending ranked list per query position
    /// * `Err(String)` - Error if a query has the wrong dimension or zero norm
    pub fn nearest(
        &self,
        queries: &[Option<&WordVector>],
        n: usize,
        exclude: &[usize],
    ) -> Result<Vec<Vec<WordDist>>, String> {
        let mut prepared: Vec<Option<(&str, Vec<f32>)>> = Vec::with_capacity(queries.len());
        for query in queries {
            match query {
                Some(wv) => {
                    if let Some(d) = self.dimension {
                        if wv.values.len() != d {
                            return Err("Wrong query dimension".to_string());
                        }
                    }
                    prepared.push(Some((wv.word.as_str(), l2_norm(&wv.values)?)));
                }
                None => prepared.push(None),
            }
        }

        let mut lists: Vec<Vec<WordDist>> = vec![Vec::new(); queries.len()];

        for (index, candidate) in self.vocab.iter().enumerate() {
            if exclude.contains(&index) {
                continue;
            }

            for (slot, prep) in prepared.iter().enumerate() {
                let Some((label, query_values)) = prep else {
                    continue;
                };
                // A literal label match is never a neighbor, independent of the exclude set
                if *label == candidate.word {
                    continue;
                }

                let score = dot_product(query_values, &candidate.values).unwrap();

                let list = &mut lists[slot];
                if list.len() >= n {
                    if let Some(tail) = list.last() {
                        if score <= tail.score {
                            continue;
                        }
                    }
                }

                sorted_insert(
                    list,
                    WordDist { word: candidate.word.clone(), score },
                    by_score_desc,
                );
                list.truncate(n);
            }
        }

        // Stable, so tie order from the scan is preserved
        for list in &mut lists {
            list.sort_by(|a, b| b.score.total_cmp(&a.score));
            list.truncate(n);
        }

        Ok(lists)
    }

    /// Ranks the nearest neighbors of each query word.
    ///
    /// `words` and `exclude_words` are resolved in one combined batch lookup.
    /// Out-of-vocabulary query words yield empty lists at their positions;
    /// out-of-vocabulary excludes are ignored. Excluded words never appear
    /// in any result list.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    ///     ("dog".to_string(), vec![0.0, 1.0, 0.0]),
    ///     ("fish".to_string(), vec![0.0, 0.0, 1.0]),
    /// ]).unwrap();
    ///
    /// let lists = model.most_similar(&["cat"], 2, &[]).unwrap();
    /// // dog and fish are both orthogonal to cat; ties keep vocabulary order
    /// assert_eq!(lists[0][0].word, "dog");
    /// assert_eq!(lists[0][1].word, "fish");
    /// ```
    pub fn most_similar(
        &self,
        words: &[&str],
        n: usize,
        exclude_words: &[&str],
    ) -> Result<Vec<Vec<WordDist>>, String> {
        let combined: Vec<&str> = words.iter().chain(exclude_words.iter()).copied().collect();
        let indices = self.lookup_batch_indices(&combined);
        let (query_indices, exclude_indices) = indices.split_at(words.len());

        let queries: Vec<Option<&WordVector>> = query_indices
            .iter()
            .map(|index| index.map(|i| &self.vocab[i]))
            .collect();
        let exclude: Vec<usize> = exclude_indices.iter().filter_map(|i| *i).collect();

        self.nearest(&queries, n, &exclude)
    }

    /// Answers an analogy query via vector arithmetic.
    ///
    /// The combined query is `sum(positives) - sum(negatives)`, accumulated
    /// from a zero vector of the model's dimensionality. All operands are
    /// resolved in one batch; if any is out of vocabulary the whole query
    /// fails closed and returns no results. Operands are excluded from
    /// candidacy, so an analogy never returns one of its own inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    ///     ("dog".to_string(), vec![0.0, 1.0, 0.0]),
    ///     ("fish".to_string(), vec![0.0, 0.0, 1.0]),
    ///     ("kitten".to_string(), vec![0.9, 0.1, 0.0]),
    /// ]).unwrap();
    ///
    /// // cat - dog points towards kitten, away from fish
    /// let results = model.analogy(&["cat"], &["dog"], 1).unwrap();
    /// assert_eq!(results[0].word, "kitten");
    ///
    /// // Any unresolved operand fails the whole query closed
    /// let results = model.analogy(&["cat"], &["ghost"], 1).unwrap();
    /// assert!(results.is_empty());
    /// ```
    pub fn analogy(
        &self,
        positives: &[&str],
        negatives: &[&str],
        n: usize,
    ) -> Result<Vec<WordDist>, String> {
        let combined: Vec<&str> = positives.iter().chain(negatives.iter()).copied().collect();
        let resolved = self.lookup_batch_indices(&combined);
        if resolved.iter().any(|index| index.is_none()) {
            return Ok(Vec::new());
        }
        let indices: Vec<usize> = resolved.into_iter().flatten().collect();

        let dimension = match self.dimension {
            Some(d) => d,
            None => return Ok(Vec::new()),
        };

        let (pos_indices, neg_indices) = indices.split_at(positives.len());

        let mut values = vec![0.0; dimension];
        for index in pos_indices {
            values = add(&values, &self.vocab[*index].values)?;
        }
        for index in neg_indices {
            values = sub(&values, &self.vocab[*index].values)?;
        }

        let query = WordVector { word: String::new(), values };
        let lists = self.nearest(&[Some(&query)], n, &indices)?;

        Ok(lists.into_iter().next().unwrap_or_default())
    }

    /// Returns the number of vocabulary entries.
    pub fn count(&self) -> usize {
        self.vocab.len()
    }

    /// Returns the embedding dimensionality, or `None` for an empty model.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Saves the model to a file using bincode serialization.
    ///
    /// The vocabulary and dimension metadata are serialized into a compact
    /// binary format and written to disk using buffered I/O.
    ///
    /// # Arguments
    ///
    /// * `path` - File path to save the model to
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Model saved successfully
    /// * `Err(String)` - Error if file creation or serialization fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wordvec::Model;
    ///
    /// let model = Model::from_entries(vec![
    ///     ("cat".to_string(), vec![1.0, 0.0, 0.0]),
    /// ]).unwrap();
    /// model.save("my_model.db").unwrap();
    /// ```
    pub fn save(&self, path: &str) -> Result<(), String> {
        let file = File::create(path)
            .map_err(|e| format!("Fail to create file for saving '{}': {}", path, e))?;

        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .map_err(|e| format!("Serialization failed: {}", e))?;

        Ok(())
    }

    /// Loads a model from a file previously saved with [`save`](Model::save).
    ///
    /// # Arguments
    ///
    /// * `path` - File path to load the model from
    ///
    /// # Returns
    ///
    /// * `Ok(Model)` - The loaded model
    /// * `Err(String)` - Error if file not found, cannot be opened, or deserialization fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wordvec::Model;
    ///
    /// let model = Model::load("my_model.db").unwrap();
    /// println!("Loaded {} words", model.count());
    /// ```
    pub fn load(path: &str) -> Result<Self, String> {
        if !std::path::Path::new(path).exists() {
            return Err("File not found!".to_string());
        }

        let file = File::open(path)
            .map_err(|e| format!("Fail to open file for loading '{}': {}", path, e))?;

        let reader = BufReader::new(file);

        let model: Model = bincode::deserialize_from(reader)
            .map_err(|e| format!("Deserialization failed: {}", e))?;

        Ok(model)
    }
}

#[cfg(test)]
mod model_test {
    use super::*;

    /// cat, dog and fish are mutually orthogonal; kitten sits next to cat
    fn small_model() -> Model {
        Model::from_entries(vec![
            ("cat".to_string(), vec![1.0, 0.0, 0.0]),
            ("dog".to_string(), vec![0.0, 1.0, 0.0]),
            ("fish".to_string(), vec![0.0, 0.0, 1.0]),
            ("kitten".to_string(), vec![0.9, 0.1, 0.0]),
        ])
        .unwrap()
    }

    // ========== Construction Tests ==========

    #[test]
    fn test_from_entries_normalizes_vectors() {
        let model = Model::from_entries(vec![
            ("a".to_string(), vec![3.0, 4.0]),
        ])
        .unwrap();

        let wv = model.lookup("a").unwrap();
        assert!((wv.values[0] - 0.6).abs() < 1e-6);
        assert!((wv.values[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_from_entries_dimension_mismatch() {
        let result = Model::from_entries(vec![
            ("a".to_string(), vec![1.0, 0.0]),
            ("b".to_string(), vec![1.0, 0.0, 0.0]),
        ]);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("'b'"));
    }

    #[test]
    fn test_from_entries_zero_vector() {
        let result = Model::from_entries(vec![
            ("a".to_string(), vec![1.0, 0.0]),
            ("zero".to_string(), vec![0.0, 0.0]),
        ]);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("'zero'"));
    }

    #[test]
    fn test_empty_model() {
        let model = Model::new();

        assert_eq!(model.count(), 0);
        assert_eq!(model.dimension(), None);
        assert!(model.lookup("cat").is_none());
    }

    #[test]
    fn test_from_entries_empty_matches_new() {
        let model = Model::from_entries(Vec::new()).unwrap();

        assert_eq!(model.count(), 0);
        assert_eq!(model.dimension(), None);
    }

    // ========== Lookup Tests ==========

    #[test]
    fn test_lookup_first_match_wins() {
        // Duplicate labels are allowed; the first occurrence resolves
        let model = Model::from_entries(vec![
            ("cat".to_string(), vec![1.0, 0.0]),
            ("cat".to_string(), vec![0.0, 1.0]),
        ])
        .unwrap();

        let wv = model.lookup("cat").unwrap();
        assert!((wv.values[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lookup_batch_preserves_order_and_length() {
        let model = small_model();

        let vectors = model.lookup_batch(&["fish", "ghost", "cat"]);

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0].unwrap().word, "fish");
        assert!(vectors[1].is_none());
        assert_eq!(vectors[2].unwrap().word, "cat");
    }

    #[test]
    fn test_lookup_batch_repeated_word() {
        let model = small_model();

        let vectors = model.lookup_batch(&["dog", "dog"]);

        assert_eq!(vectors[0].unwrap().word, "dog");
        assert_eq!(vectors[1].unwrap().word, "dog");
    }

    #[test]
    fn test_lookup_batch_empty_request() {
        let model = small_model();

        assert!(model.lookup_batch(&[]).is_empty());
    }

    // ========== Similarity Tests ==========

    #[test]
    fn test_similarity_identical_words() {
        let model = small_model();

        // Literal equality scores 1 even out of vocabulary
        assert_eq!(model.similarity("cat", "cat"), Some(1.0));
        assert_eq!(model.similarity("ghost", "ghost"), Some(1.0));
    }

    #[test]
    fn test_similarity_orthogonal_words() {
        let model = small_model();

        let score = model.similarity("cat", "dog").unwrap();
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn test_similarity_close_words() {
        let model = small_model();

        // cat . kitten = 0.9 / sqrt(0.81 + 0.01) ~ 0.9939
        let score = model.similarity("cat", "kitten").unwrap();
        assert!((score - 0.9939).abs() < 1e-3);
    }

    #[test]
    fn test_similarity_unresolved_word() {
        let model = small_model();

        assert!(model.similarity("cat", "ghost").is_none());
        assert!(model.similarity("ghost", "dog").is_none());
    }

    // ========== Nearest / Most Similar Tests ==========

    #[test]
    fn test_most_similar_top_one() {
        let model = small_model();

        let lists = model.most_similar(&["cat"], 1, &[]).unwrap();

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].len(), 1);
        assert_eq!(lists[0][0].word, "kitten");
        assert!((lists[0][0].score - 0.9939).abs() < 1e-3);
    }

    #[test]
    fn test_most_similar_never_returns_query_word() {
        let model = small_model();

        let lists = model.most_similar(&["cat"], 10, &[]).unwrap();

        assert!(lists[0].iter().all(|d| d.word != "cat"));
        assert_eq!(lists[0].len(), 3);
    }

    #[test]
    fn test_most_similar_tie_break_keeps_vocab_order() {
        let model = Model::from_entries(vec![
            ("cat".to_string(), vec![1.0, 0.0, 0.0]),
            ("dog".to_string(), vec![0.0, 1.0, 0.0]),
            ("fish".to_string(), vec![0.0, 0.0, 1.0]),
        ])
        .unwrap();

        // dog and fish both score 0 against cat; vocabulary order decides
        let lists = model.most_similar(&["cat"], 2, &[]).unwrap();

        assert_eq!(lists[0].len(), 2);
        assert_eq!(lists[0][0].word, "dog");
        assert_eq!(lists[0][1].word, "fish");
    }

    #[test]
    fn test_most_similar_respects_excludes() {
        let model = small_model();

        let lists = model.most_similar(&["cat"], 10, &["kitten"]).unwrap();

        assert!(lists[0].iter().all(|d| d.word != "kitten"));
        assert_eq!(lists[0].len(), 2);
    }

    #[test]
    fn test_most_similar_unknown_exclude_ignored() {
        let model = small_model();

        let lists = model.most_similar(&["cat"], 10, &["ghost"]).unwrap();

        assert_eq!(lists[0].len(), 3);
    }

    #[test]
    fn test_most_similar_unresolved_query_gives_empty_list() {
        let model = small_model();

        let lists = model.most_similar(&["ghost", "cat"], 2, &[]).unwrap();

        assert_eq!(lists.len(), 2);
        assert!(lists[0].is_empty());
        assert_eq!(lists[1].len(), 2);
    }

    #[test]
    fn test_most_similar_caps_results() {
        let model = small_model();

        let lists = model.most_similar(&["cat"], 2, &[]).unwrap();

        assert_eq!(lists[0].len(), 2);
    }

    #[test]
    fn test_most_similar_results_sorted_descending() {
        let model = small_model();

        let lists = model.most_similar(&["kitten", "dog"], 10, &[]).unwrap();

        for list in &lists {
            for pair in list.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn test_most_similar_multiple_queries() {
        let model = small_model();

        let lists = model.most_similar(&["cat", "fish"], 1, &[]).unwrap();

        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0][0].word, "kitten");
        // Everything is orthogonal to fish; first vocabulary entry wins the tie
        assert_eq!(lists[1][0].word, "cat");
    }

    #[test]
    fn test_most_similar_on_empty_model() {
        let model = Model::from_entries(Vec::new()).unwrap();

        let lists = model.most_similar(&["cat"], 5, &[]).unwrap();

        assert_eq!(lists.len(), 1);
        assert!(lists[0].is_empty());
    }

    #[test]
    fn test_nearest_excludes_by_index_not_value() {
        // Two words share identical values; excluding one must not hide the other
        let model = Model::from_entries(vec![
            ("north".to_string(), vec![1.0, 0.0]),
            ("up".to_string(), vec![1.0, 0.0]),
            ("east".to_string(), vec![0.0, 1.0]),
        ])
        .unwrap();

        let lists = model.most_similar(&["east"], 10, &["north"]).unwrap();

        let words: Vec<&str> = lists[0].iter().map(|d| d.word.as_str()).collect();
        assert!(words.contains(&"up"));
        assert!(!words.contains(&"north"));
    }

    #[test]
    fn test_nearest_rejects_wrong_dimension_query() {
        let model = small_model();
        let query = WordVector { word: String::new(), values: vec![1.0, 0.0] };

        let result = model.nearest(&[Some(&query)], 3, &[]);

        assert!(result.is_err());
    }

    #[test]
    fn test_nearest_rejects_zero_query() {
        let model = small_model();
        let query = WordVector { word: String::new(), values: vec![0.0, 0.0, 0.0] };

        let result = model.nearest(&[Some(&query)], 3, &[]);

        assert!(result.is_err());
    }

    #[test]
    fn test_nearest_renormalizes_query() {
        let model = small_model();
        // Unnormalized query must score like its unit-length counterpart
        let query = WordVector { word: String::new(), values: vec![10.0, 0.0, 0.0] };

        let lists = model.nearest(&[Some(&query)], 1, &[]).unwrap();

        assert_eq!(lists[0][0].word, "cat");
        assert!((lists[0][0].score - 1.0).abs() < 1e-5);
    }

    // ========== Analogy Tests ==========

    #[test]
    fn test_analogy_basic_direction() {
        let model = small_model();

        // cat - dog = [1, -1, 0]; kitten is the best remaining match
        let results = model.analogy(&["cat"], &["dog"], 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "kitten");
        // kitten . normalized([1,-1,0]) = (0.9939 - 0.1104) / sqrt(2) ~ 0.6247
        assert!((results[0].score - 0.6247).abs() < 1e-3);
        assert_eq!(results[1].word, "fish");
    }

    #[test]
    fn test_analogy_excludes_operands() {
        let model = small_model();

        let results = model.analogy(&["cat"], &["dog"], 10).unwrap();

        assert!(results.iter().all(|d| d.word != "cat" && d.word != "dog"));
    }

    #[test]
    fn test_analogy_fails_closed_on_unresolved_word() {
        let model = small_model();

        assert!(model.analogy(&["cat", "ghost"], &["dog"], 5).unwrap().is_empty());
        assert!(model.analogy(&["cat"], &["ghost"], 5).unwrap().is_empty());
    }

    #[test]
    fn test_analogy_zero_combination_is_an_error() {
        let model = small_model();

        // cat - cat collapses to the zero vector
        let result = model.analogy(&["cat"], &["cat"], 5);

        assert!(result.is_err());
    }

    #[test]
    fn test_analogy_on_empty_model() {
        let model = Model::from_entries(Vec::new()).unwrap();

        assert!(model.analogy(&["cat"], &["dog"], 5).unwrap().is_empty());
    }

    // ========== Save/Load Tests ==========

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.db");
        let path_str = path.to_str().unwrap();

        let model = small_model();
        model.save(path_str).unwrap();

        let loaded = Model::load(path_str).unwrap();
        assert_eq!(loaded.count(), 4);
        assert_eq!(loaded.dimension(), Some(3));

        // Queries behave identically on the loaded model
        let lists = loaded.most_similar(&["cat"], 1, &[]).unwrap();
        assert_eq!(lists[0][0].word, "kitten");
    }

    #[test]
    fn test_load_nonexistent_file() {
        match Model::load("nonexistent_model.db") {
            Err(e) => assert!(e.contains("File not found")),
            Ok(_) => panic!("Expected error for nonexistent file"),
        }
    }
}
