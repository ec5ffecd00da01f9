/*!
# Zelikovsky's 11/6-Approximation

Starts with a minimum spanning tree `T` over the complete distance graph of all terminals and
greedily contracts *triples*: three terminals together with a *center* node minimizing the sum of
distances to them. Connecting a triple through its center makes two save edges of `T` superfluous,
so the *win* of a triple is its gain minus its cost (or gain divided by cost). The triple with the
largest positive win is contracted in `T`, its center is promoted to a terminal, and the search
repeats until no triple wins anymore. Finally a [`Takahashi`] run from every terminal connects all
terminals and promoted centers; the lightest resulting tree is returned.

The algorithm can be tuned by five independent options:

| Option | Variants |
|---|---|
| [`WinCalculation`] | `gain - cost` or `gain / cost` |
| [`TripleGeneration`] | all centers, centers in the Voronoi regions of the triple, or lazily per center |
| [`TripleReducing`] | drop triples as soon as their win is non-positive, or keep them |
| [`SaveCalculation`] | which [`Save`] structure answers gain queries |
| [`Pass`] | greedy multi-pass or a single pass over the triples ordered by cost |
*/

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use super::{save::*, *};

/// Objective used to rank triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinCalculation {
    /// `gain - cost`
    #[default]
    Absolute,
    /// `gain / cost`
    Relative,
}

/// Strategy to enumerate candidate triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripleGeneration {
    /// Every node is a center candidate for every triple
    Exhaustive,
    /// Only nodes in the Voronoi regions of the three terminals are center candidates
    #[default]
    Voronoi,
    /// No triples are stored; every round searches the best triple per non-terminal center
    OnDemand,
}

/// Whether triples are dropped as soon as their win is known to be non-positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripleReducing {
    #[default]
    On,
    Off,
}

/// Structure answering save edge queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveCalculation {
    /// Table of all pairwise save edges; fast queries, quadratic space
    StaticTree,
    /// Heaviest-edge tree rebuilt after every contraction
    StaticLcaTree,
    /// Heaviest-edge tree updated in place after every contraction
    DynamicLcaTree,
    /// [`SaveCalculation::StaticTree`] while generating triples,
    /// [`SaveCalculation::DynamicLcaTree`] while contracting them
    #[default]
    Hybrid,
}

/// Contraction schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pass {
    /// Traverse all triples once, ordered by decreasing cost, and contract every triple that
    /// still wins
    One,
    /// Repeatedly contract the triple with the largest win
    #[default]
    Multi,
}

/// Zelikovsky's contraction algorithm.
///
/// # Example
/// ```
/// use steiner_approx::{prelude::*, steiner::*};
///
/// // terminals 0, 1, 2 around the center 3; direct edges are more expensive
/// let graph = WeightedGraph::from_edges(
///     4,
///     [(0, 3, 1u32), (1, 3, 1), (2, 3, 1), (0, 1, 3), (1, 2, 3), (0, 2, 3)],
/// );
/// let terminals = Terminals::new(&graph, [0, 1, 2]).unwrap();
///
/// let mut algo = Zelikovsky::new()
///     .triple_generation(TripleGeneration::Exhaustive)
///     .pass(Pass::One);
/// let solution = algo.call(&graph, &terminals).unwrap();
///
/// assert_eq!(solution.weight(), 3);
/// assert_eq!(algo.number_of_contracted_triples(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Zelikovsky {
    win_calculation: WinCalculation,
    triple_generation: TripleGeneration,
    triple_reducing: TripleReducing,
    save_calculation: SaveCalculation,
    pass: Pass,
    time_limit: Duration,

    triples_generated: usize,
    triples_contracted: usize,
    triple_lookups: usize,
    running_time: Duration,
}

impl Default for Zelikovsky {
    fn default() -> Self {
        Self {
            win_calculation: WinCalculation::default(),
            triple_generation: TripleGeneration::default(),
            triple_reducing: TripleReducing::default(),
            save_calculation: SaveCalculation::default(),
            pass: Pass::default(),
            time_limit: Duration::from_secs(3600),
            triples_generated: 0,
            triples_contracted: 0,
            triple_lookups: 0,
            running_time: Duration::ZERO,
        }
    }
}

impl Zelikovsky {
    /// Creates a new instance with absolute wins, Voronoi triple generation, triple reducing,
    /// hybrid save calculation, multiple passes and a time limit of one hour
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how the win of a triple is computed
    pub fn set_win_calculation(&mut self, win_calculation: WinCalculation) {
        self.win_calculation = win_calculation;
    }

    /// Sets how the win of a triple is computed
    pub fn win_calculation(mut self, win_calculation: WinCalculation) -> Self {
        self.set_win_calculation(win_calculation);
        self
    }

    /// Sets how candidate triples are enumerated
    pub fn set_triple_generation(&mut self, triple_generation: TripleGeneration) {
        self.triple_generation = triple_generation;
    }

    /// Sets how candidate triples are enumerated
    pub fn triple_generation(mut self, triple_generation: TripleGeneration) -> Self {
        self.set_triple_generation(triple_generation);
        self
    }

    /// Sets whether triples without positive win are dropped early
    pub fn set_triple_reducing(&mut self, triple_reducing: TripleReducing) {
        self.triple_reducing = triple_reducing;
    }

    /// Sets whether triples without positive win are dropped early
    pub fn triple_reducing(mut self, triple_reducing: TripleReducing) -> Self {
        self.set_triple_reducing(triple_reducing);
        self
    }

    /// Sets the structure answering save edge queries
    pub fn set_save_calculation(&mut self, save_calculation: SaveCalculation) {
        self.save_calculation = save_calculation;
    }

    /// Sets the structure answering save edge queries
    pub fn save_calculation(mut self, save_calculation: SaveCalculation) -> Self {
        self.set_save_calculation(save_calculation);
        self
    }

    /// Sets the contraction schedule
    pub fn set_pass(&mut self, pass: Pass) {
        self.pass = pass;
    }

    /// Sets the contraction schedule
    pub fn pass(mut self, pass: Pass) -> Self {
        self.set_pass(pass);
        self
    }

    /// Bounds the time spent searching for triples. Once exceeded, no further triples are
    /// generated or contracted and the result is built from the contractions done so far.
    pub fn set_time_limit(&mut self, time_limit: Duration) {
        self.time_limit = time_limit;
    }

    /// Bounds the time spent searching for triples
    pub fn time_limit(mut self, time_limit: Duration) -> Self {
        self.set_time_limit(time_limit);
        self
    }

    /// Returns the number of triples generated during the last call
    pub fn number_of_generated_triples(&self) -> usize {
        self.triples_generated
    }

    /// Returns the number of triples contracted during the last call
    pub fn number_of_contracted_triples(&self) -> usize {
        self.triples_contracted
    }

    /// Returns the number of win evaluations of stored triples during the last call
    pub fn number_of_triple_lookups(&self) -> usize {
        self.triple_lookups
    }

    /// Returns the duration of the last call
    pub fn running_time(&self) -> Duration {
        self.running_time
    }

    fn win<W: Weight>(&self, gain: W, triple: &Triple<W>) -> f64 {
        match self.win_calculation {
            WinCalculation::Absolute => gain.as_f64() - triple.cost().as_f64(),
            WinCalculation::Relative => gain.as_f64() / triple.cost().as_f64(),
        }
    }

    fn is_reducing(&self) -> bool {
        self.triple_reducing == TripleReducing::On
    }
}

/// State shared by all phases of one call
struct Contraction<'t, W> {
    terminals: &'t Terminals,
    distances: Vec<ShortestPathTree<W>>,
    new_terminals: Terminals,
    deadline: Option<Instant>,
}

impl<W: Weight> Contraction<'_, W> {
    /// Returns the sum of distances from `x` to the terminals with the given indices
    fn center_cost(&self, indices: [usize; 3], x: Node) -> Option<W> {
        indices
            .iter()
            .map(|&i| self.distances[i].distance(x))
            .sum()
    }

    fn is_expired(&self) -> bool {
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        if expired {
            warn!("Zelikovsky: time limit exceeded, continuing with the contractions found so far");
        }
        expired
    }
}

impl Zelikovsky {
    fn contract<W: Weight>(
        &mut self,
        state: &mut Contraction<'_, W>,
        save: &mut SaveStructure<'_, W>,
        triple: &Triple<W>,
    ) {
        self.triples_contracted += 1;
        save.update(triple);
        if !state.terminals.contains(triple.center()) {
            state.new_terminals.insert(triple.center());
        }
        trace!(
            "Zelikovsky: contracted {:?} via center {} of cost {}",
            triple.terminals(),
            triple.center(),
            triple.cost()
        );
    }

    /// Stores all triples worth keeping and returns the one with the largest positive win
    fn generate_triples<W, S>(
        &mut self,
        graph: &WeightedGraph<W>,
        state: &Contraction<'_, W>,
        save: &S,
        triples: &mut Vec<Triple<W>>,
    ) -> Option<Triple<W>>
    where
        W: Weight,
        S: Save<W>,
    {
        let voronoi = (self.triple_generation == TripleGeneration::Voronoi)
            .then(|| graph.voronoi_regions(state.terminals.as_slice()));

        let terminals = state.terminals;
        let k = terminals.len();
        let mut best: Option<(f64, Triple<W>)> = None;

        'outer: for i in 0..k {
            if state.is_expired() {
                break 'outer;
            }

            for j in (i + 1)..k {
                for l in (j + 1)..k {
                    let [u, v, w] = [terminals[i], terminals[j], terminals[l]];
                    let gain = save.gain(u, v, w);
                    if self.is_reducing() && !gain.is_positive() {
                        continue;
                    }

                    let mut center: Option<(W, Node)> = None;
                    let mut consider = |x: Node| {
                        if let Some(cost) = state.center_cost([i, j, l], x) {
                            if center.is_none_or(|(c, _)| cost < c) {
                                center = Some((cost, x));
                            }
                        }
                    };
                    match &voronoi {
                        Some(voronoi) => [u, v, w]
                            .iter()
                            .flat_map(|&s| voronoi.nodes_in_region(s))
                            .for_each(|&x| consider(x)),
                        None => graph.vertices().for_each(consider),
                    }

                    let Some((cost, z)) = center else {
                        continue;
                    };
                    let triple = Triple::new(u, v, w, z, cost);
                    let win = self.win(gain, &triple);
                    if !self.is_reducing() || win > 0.0 {
                        self.triples_generated += 1;
                        triples.push(triple);
                        if best.is_none_or(|(best_win, _)| win > best_win) && win > 0.0 {
                            best = Some((win, triple));
                        }
                    }
                }
            }
        }

        debug!(
            "Zelikovsky: generated {} triples over {} terminals",
            self.triples_generated, k
        );
        best.map(|(_, triple)| triple)
    }

    fn multi_pass<W: Weight>(
        &mut self,
        state: &mut Contraction<'_, W>,
        save: &mut SaveStructure<'_, W>,
        mut triples: Vec<Triple<W>>,
    ) {
        loop {
            if state.is_expired() {
                break;
            }

            let mut kept = Vec::with_capacity(triples.len());
            let mut best: Option<(f64, usize)> = None;
            for triple in triples.drain(..) {
                self.triple_lookups += 1;
                if self.is_reducing() && save.already_contracted(&triple) {
                    continue;
                }

                let win = self.win(save.gain(triple.s0(), triple.s1(), triple.s2()), &triple);
                if win > best.map_or(0.0, |(w, _)| w) {
                    best = Some((win, kept.len()));
                } else if self.is_reducing() && win <= 0.0 {
                    continue;
                }
                kept.push(triple);
            }

            let Some((_, index)) = best else {
                break;
            };
            let triple = if self.is_reducing() {
                kept.remove(index)
            } else {
                kept[index]
            };
            self.contract(state, save, &triple);
            triples = kept;
        }
    }

    fn one_pass<W: Weight>(
        &mut self,
        state: &mut Contraction<'_, W>,
        save: &mut SaveStructure<'_, W>,
        mut triples: Vec<Triple<W>>,
    ) {
        triples.sort_by(|a, b| b.cost().cmp_weight(&a.cost()));
        for triple in triples {
            self.triple_lookups += 1;
            if self.win(save.gain(triple.s0(), triple.s1(), triple.s2()), &triple) > 0.0 {
                self.contract(state, save, &triple);
            }
        }
    }

    /// Repeatedly finds, for every non-terminal center, the triple with the largest absolute win
    /// and contracts the best one overall
    fn triples_on_demand<W: Weight>(
        &mut self,
        graph: &WeightedGraph<W>,
        state: &mut Contraction<'_, W>,
        save: &mut SaveStructure<'_, W>,
    ) {
        let k = state.terminals.len();
        loop {
            if state.is_expired() {
                break;
            }

            let mut best: Option<(f64, Triple<W>)> = None;
            for z in graph.vertices() {
                if state.terminals.contains(z) {
                    continue;
                }
                let Some(dist) = (0..k)
                    .map(|i| state.distances[i].distance(z))
                    .collect::<Option<Vec<W>>>()
                else {
                    continue;
                };
                let terminal = |i: usize| state.terminals[i];

                let Some(s0) = (0..k).min_by(|&a, &b| dist[a].cmp_weight(&dist[b])) else {
                    continue;
                };

                let mut s1: Option<(f64, usize)> = None;
                for v in (0..k).filter(|&v| v != s0) {
                    let value = save.save_weight(terminal(v), terminal(s0)).as_f64()
                        - dist[v].as_f64();
                    if s1.is_none_or(|(max, _)| max < value) {
                        s1 = Some((value, v));
                    }
                }
                let Some((_, s1)) = s1 else {
                    continue;
                };

                let mut s2: Option<(f64, usize)> = None;
                for v in (0..k).filter(|&v| v != s0 && v != s1) {
                    let win = save
                        .gain(terminal(s0), terminal(s1), terminal(v))
                        .as_f64()
                        - (dist[s0] + dist[s1] + dist[v]).as_f64();
                    if win > s2.map_or(0.0, |(max, _)| max) {
                        s2 = Some((win, v));
                    }
                }

                if let Some((win, s2)) = s2 {
                    if win > best.as_ref().map_or(0.0, |(max, _)| *max) {
                        let cost = dist[s0] + dist[s1] + dist[s2];
                        let triple = Triple::new(terminal(s0), terminal(s1), terminal(s2), z, cost);
                        best = Some((win, triple));
                    }
                }
            }

            let Some((_, triple)) = best else {
                break;
            };
            self.triples_generated += 1;
            self.contract(state, save, &triple);
        }
    }
}

impl MinSteinerTree for Zelikovsky {
    fn call<'a, W: Weight>(
        &mut self,
        graph: &'a WeightedGraph<W>,
        terminals: &Terminals,
    ) -> Result<SteinerSolution<'a, W>, SteinerError> {
        let timer = Instant::now();
        self.triples_generated = 0;
        self.triples_contracted = 0;
        self.triple_lookups = 0;

        terminals.ensure_connected(graph)?;

        let mut state = Contraction {
            terminals,
            distances: terminals.iter().map(|t| graph.dijkstra(t)).collect(),
            new_terminals: terminals.clone(),
            deadline: timer.checked_add(self.time_limit),
        };

        let terminal_tree = terminal_spanning_tree(graph, terminals, |i, j| {
            state.distances[i].distance_or_infinity(terminals[j])
        });
        debug!(
            "Zelikovsky: terminal spanning tree of weight {}",
            terminal_tree.total_weight()
        );

        let mut save = match self.save_calculation {
            SaveCalculation::StaticTree => {
                SaveStructure::StaticTree(StaticTree::new(&terminal_tree))
            }
            SaveCalculation::StaticLcaTree => {
                SaveStructure::StaticLcaTree(StaticLcaTree::new(&terminal_tree))
            }
            SaveCalculation::DynamicLcaTree | SaveCalculation::Hybrid => {
                SaveStructure::DynamicLcaTree(DynamicLcaTree::new(&terminal_tree))
            }
        };

        if self.triple_generation == TripleGeneration::OnDemand {
            self.triples_on_demand(graph, &mut state, &mut save);
        } else {
            let mut triples = Vec::new();
            let best = if self.save_calculation == SaveCalculation::Hybrid {
                let table = StaticTree::new(&terminal_tree);
                self.generate_triples(graph, &state, &table, &mut triples)
            } else {
                self.generate_triples(graph, &state, &save, &mut triples)
            };

            if let Some(best) = best {
                self.contract(&mut state, &mut save, &best);
                match self.pass {
                    Pass::Multi => self.multi_pass(&mut state, &mut save, triples),
                    Pass::One => self.one_pass(&mut state, &mut save, triples),
                }
            }
        }
        debug!(
            "Zelikovsky: contracted {} triples, {} centers promoted",
            self.triples_contracted,
            state.new_terminals.len() - terminals.len()
        );

        let solution = best_takahashi_tree(graph, terminals, &state.new_terminals)?;
        self.running_time = timer.elapsed();
        debug!(
            "Zelikovsky: Steiner tree of weight {} in {:?}",
            solution.weight(),
            self.running_time
        );

        Ok(solution)
    }
}

#[cfg(test)]
crate::testing::test_steiner_algorithm!(zelikovsky_default, Zelikovsky::new());

#[cfg(test)]
crate::testing::test_steiner_algorithm!(
    zelikovsky_exhaustive_one_pass,
    Zelikovsky::new()
        .triple_generation(TripleGeneration::Exhaustive)
        .save_calculation(SaveCalculation::StaticTree)
        .pass(Pass::One)
);

#[cfg(test)]
crate::testing::test_steiner_algorithm!(
    zelikovsky_on_demand,
    Zelikovsky::new()
        .triple_generation(TripleGeneration::OnDemand)
        .save_calculation(SaveCalculation::StaticLcaTree)
);

#[cfg(test)]
crate::testing::test_steiner_algorithm!(
    zelikovsky_relative_unreduced,
    Zelikovsky::new()
        .win_calculation(WinCalculation::Relative)
        .triple_reducing(TripleReducing::Off)
        .save_calculation(SaveCalculation::DynamicLcaTree)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn spider() -> (WeightedGraph<u32>, Terminals) {
        let graph = WeightedGraph::from_edges(
            4,
            [(0, 3, 1), (1, 3, 1), (2, 3, 1), (0, 1, 3), (1, 2, 3), (0, 2, 3)],
        );
        let terminals = Terminals::new(&graph, [0, 1, 2]).unwrap();
        (graph, terminals)
    }

    #[test]
    fn contracts_the_winning_triple() {
        for generation in [
            TripleGeneration::Exhaustive,
            TripleGeneration::Voronoi,
            TripleGeneration::OnDemand,
        ] {
            let (graph, terminals) = spider();
            let mut algo = Zelikovsky::new().triple_generation(generation);

            let solution = algo.call(&graph, &terminals).unwrap();
            assert_eq!(solution.weight(), 3);
            assert!(solution.tree().copy_of_node(3).is_some());
            assert_eq!(algo.number_of_contracted_triples(), 1);
            assert_eq!(algo.number_of_generated_triples(), 1);
        }
    }

    #[test]
    fn setters_and_builders_configure_alike() {
        let built = Zelikovsky::new()
            .win_calculation(WinCalculation::Relative)
            .triple_generation(TripleGeneration::OnDemand)
            .triple_reducing(TripleReducing::Off)
            .save_calculation(SaveCalculation::StaticLcaTree)
            .pass(Pass::One)
            .time_limit(Duration::from_secs(5));

        let mut set = Zelikovsky::new();
        set.set_win_calculation(WinCalculation::Relative);
        set.set_triple_generation(TripleGeneration::OnDemand);
        set.set_triple_reducing(TripleReducing::Off);
        set.set_save_calculation(SaveCalculation::StaticLcaTree);
        set.set_pass(Pass::One);
        set.set_time_limit(Duration::from_secs(5));

        for algo in [&built, &set] {
            assert_eq!(algo.win_calculation, WinCalculation::Relative);
            assert_eq!(algo.triple_generation, TripleGeneration::OnDemand);
            assert_eq!(algo.triple_reducing, TripleReducing::Off);
            assert_eq!(algo.save_calculation, SaveCalculation::StaticLcaTree);
            assert_eq!(algo.pass, Pass::One);
            assert_eq!(algo.time_limit, Duration::from_secs(5));
        }
    }

    #[test]
    fn statistics_are_reset() {
        let (graph, terminals) = spider();
        let mut algo = Zelikovsky::new();
        algo.call(&graph, &terminals).unwrap();
        algo.call(&graph, &terminals).unwrap();
        assert_eq!(algo.number_of_generated_triples(), 1);
        assert_eq!(algo.number_of_contracted_triples(), 1);
    }

    #[test]
    fn no_triples_without_three_terminals() {
        let (graph, terminals) = star_with_extra_leaf();
        let mut algo = Zelikovsky::new();
        let solution = algo.call(&graph, &terminals).unwrap();

        assert_eq!(solution.weight(), 2);
        assert_eq!(algo.number_of_generated_triples(), 0);
        assert_eq!(algo.number_of_triple_lookups(), 0);
    }

    #[test]
    fn zero_time_limit_still_yields_a_tree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        let (graph, terminals) = random_instance(rng, 30, 70, 10);

        let mut algo = Zelikovsky::new().time_limit(Duration::ZERO);
        let solution = algo.call(&graph, &terminals).unwrap();
        assert!(solution.tree().is_steiner_tree(&terminals));
        assert_eq!(algo.number_of_contracted_triples(), 0);
    }

    #[test]
    fn options_agree_on_quality() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);

        for _ in 0..10 {
            let n = rng.random_range(10..30);
            let (graph, terminals) = random_instance(rng, n, 2 * n, 6);
            let mst_bound = Kou::new().call(&graph, &terminals).unwrap().weight();

            for save in [
                SaveCalculation::StaticTree,
                SaveCalculation::StaticLcaTree,
                SaveCalculation::DynamicLcaTree,
                SaveCalculation::Hybrid,
            ] {
                let weights: Vec<u32> = [Pass::One, Pass::Multi]
                    .into_iter()
                    .map(|pass| {
                        Zelikovsky::new()
                            .save_calculation(save)
                            .pass(pass)
                            .call(&graph, &terminals)
                            .unwrap()
                            .weight()
                    })
                    .collect();
                assert!(weights.iter().all(|&w| w <= 2 * mst_bound));
            }
        }
    }
}
