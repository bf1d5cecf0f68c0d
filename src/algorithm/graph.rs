use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

use crate::catalog::Catalog;

/// Cómo se mide el "poder de desbloqueo" de un curso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockMode {
    /// Sólo los cursos que lo declaran directamente como prerequisito.
    Direct,
    /// Todos los cursos alcanzables hacia adelante.
    #[default]
    Transitive,
}

/// Arista cuyo prerequisito no existe en el catálogo.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DanglingEdge {
    pub course: String,
    pub missing_prerequisite: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrityReport {
    pub dangling_edges: Vec<DanglingEdge>,
    /// Cada ciclo como lista ordenada de ids.
    pub cycles: Vec<Vec<String>>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_edges.is_empty() && self.cycles.is_empty()
    }
}

/// Grafo de dependencias prerequisito -> dependiente, compartido por todas las
/// carreras. Los nodos son exactamente los cursos del catálogo.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    dangling: Vec<DanglingEdge>,
}

impl DependencyGraph {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for course in catalog.courses() {
            let idx = graph.add_node(course.id.clone());
            node_map.insert(course.id.clone(), idx);
        }

        // Aristas desde la lista de prerequisitos; las que apuntan fuera del
        // catálogo se anotan pero no se agregan.
        let mut dangling: Vec<DanglingEdge> = Vec::new();
        for course in catalog.courses() {
            let Some(&to) = node_map.get(&course.id) else { continue };
            for pre_id in course.prerequisites.iter() {
                match node_map.get(pre_id) {
                    Some(&from) => {
                        if graph.find_edge(from, to).is_none() {
                            graph.add_edge(from, to, ());
                        }
                    }
                    None => dangling.push(DanglingEdge {
                        course: course.id.clone(),
                        missing_prerequisite: pre_id.clone(),
                    }),
                }
            }
        }

        let dg = DependencyGraph { graph, node_map, dangling };

        for edge in dg.dangling.iter() {
            warn!(course = %edge.course, prerequisite = %edge.missing_prerequisite, "prerequisito inexistente; arista ignorada");
        }
        for cycle in dg.cycles() {
            warn!(courses = ?cycle, "ciclo de prerequisitos detectado");
        }
        debug!(nodes = dg.graph.node_count(), edges = dg.graph.edge_count(), "grafo de dependencias construido");

        dg
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, id: &str, dir: Direction) -> BTreeSet<String> {
        match self.node_map.get(id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, dir)
                .map(|n| self.graph[n].clone())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Prerequisitos directos (vacío si no tiene o si el id no existe).
    pub fn prerequisites_of(&self, id: &str) -> BTreeSet<String> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Cursos que lo declaran como prerequisito directo.
    pub fn dependents_of(&self, id: &str) -> BTreeSet<String> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Todos los cursos alcanzables hacia adelante. El BFS marca cada nodo
    /// visitado, así que un ciclo no lo hace iterar sin fin; el propio curso
    /// nunca forma parte del resultado.
    pub fn transitive_dependents_of(&self, id: &str) -> BTreeSet<String> {
        let Some(&start) = self.node_map.get(id) else {
            return BTreeSet::new();
        };
        let mut out = BTreeSet::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(nx) = bfs.next(&self.graph) {
            if nx != start {
                out.insert(self.graph[nx].clone());
            }
        }
        out
    }

    pub fn is_eligible(&self, id: &str, passed: &BTreeSet<String>) -> bool {
        match self.node_map.get(id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .all(|p| passed.contains(&self.graph[p])),
            None => true,
        }
    }

    pub fn unlock_power(&self, id: &str, mode: UnlockMode) -> usize {
        match mode {
            UnlockMode::Direct => self.dependents_of(id).len(),
            UnlockMode::Transitive => self.transitive_dependents_of(id).len(),
        }
    }

    /// Componentes fuertemente conexas con más de un nodo, o nodos con
    /// auto-arista.
    fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || (scc.len() == 1 && self.graph.find_edge(scc[0], scc[0]).is_some())
            })
            .map(|scc| {
                let mut ids: Vec<String> = scc.into_iter().map(|n| self.graph[n].clone()).collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    pub fn integrity_report(&self) -> IntegrityReport {
        let mut dangling_edges = self.dangling.clone();
        dangling_edges.sort();
        IntegrityReport {
            dangling_edges,
            cycles: self.cycles(),
        }
    }
}
