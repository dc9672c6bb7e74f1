use std::borrow::Borrow;
use std::collections::VecDeque;

type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;
type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<usize>>;


#[derive(Clone,Debug)]
struct Neighbours {
    to:HashSet<usize>,
    from:HashSet<usize>,
}

impl Neighbours {
    fn new() -> Self {
        Self {
            to:HashSet::with_hasher(nohash::BuildNoHashHasher::default()),
            from:HashSet::with_hasher(nohash::BuildNoHashHasher::default())
        }
    }
    fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {
           return Self::new();
        }
        Self {to:HashSet::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default()),
            from:HashSet::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default())
        }
    }
    fn shrink_to_fit(&mut self) {
        self.to.shrink_to_fit();
        self.from.shrink_to_fit();
    }
}

impl Default for Neighbours {
    fn default() -> Self {
        Self::new()
    }
}

// directed graph over dense node ids, the caller keeps the id <-> value mapping
#[derive(Clone,Debug)]
pub struct DirectedGraph {
    edges_len:usize,
    nodes:HashMap<usize,Neighbours>
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self {edges_len:0,nodes:HashMap::with_hasher(nohash::BuildNoHashHasher::default())}
    }
    pub fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        Self {edges_len:0,nodes:HashMap::with_capacity_and_hasher(capacity, nohash::BuildNoHashHasher::default())}
    }
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        for neighbours in self.nodes.values_mut() {
            neighbours.shrink_to_fit();
        }
    }
    pub fn nodes_len(&self) -> usize {
        self.nodes.len()
    }
    // distinct edges, pushing the same pair twice counts once
    pub fn edges_len(&self) -> usize {
        self.edges_len
    }
    pub fn contains_node(&self,node:usize) -> bool {
        self.nodes.contains_key(&node)
    }
    pub fn contains_edge(&self,start:usize,end:usize) -> bool {
        self.nodes.get(&start).is_some_and(|neighbours| neighbours.to.contains(&end))
    }
    //返回一个当前节点的to节点的迭代器
    pub fn next_nodes(&self,node:usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes.get(&node).into_iter().flat_map(|neighbours| neighbours.to.iter().copied())
    }
    pub fn prev_nodes(&self,node:usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes.get(&node).into_iter().flat_map(|neighbours| neighbours.from.iter().copied())
    }
    fn assert_pair(&self,start:usize,end:usize) {
        let start_node = self.nodes.get(&start).unwrap_or_else(|| panic!("Start node {start} non-existent"));
        let end_node = self.nodes.get(&end).unwrap_or_else(|| panic!("End node {end} non-existent"));

        if !start_node.to.contains(&end) {
            panic!("Edge {start} -> {end} defined, but {end} is not in {start}'s to list");
        }
        if !end_node.from.contains(&start) {
            panic!("Edge {start} -> {end} defined, but {start} is not in {end}'s from list");
        }
    }
    // returns false if the edge was already present
    pub fn push_pair_with_sizehint(&mut self,start:usize,end:usize,hint:usize) -> bool {
        let is_new = self.nodes.entry(start)
            .or_insert_with(|| Neighbours::with_capacity(hint))
            .to.insert(end);
        self.nodes.entry(end)
            .or_insert_with(|| Neighbours::with_capacity(hint))
            .from.insert(start);

        if is_new {
            self.edges_len += 1;
        }

        #[cfg(debug_assertions)]
        self.assert_pair(start, end);

        is_new
    }
    pub fn push_pair(&mut self,start:usize,end:usize) -> bool {
        self.push_pair_with_sizehint(start, end, 0)
    }

    // unweighted shortest path, O(V + E)
    // None if either node is missing or end can't be reached from start
    pub fn bfs_path(&self,start:usize,end:usize) -> Option<Vec<usize>> {
        if !self.contains_node(start) || !self.contains_node(end) {
            return None;
        }
        let mut predecessors:HashMap<usize,usize> = HashMap::with_capacity_and_hasher(
            self.nodes_len(), nohash::BuildNoHashHasher::default()
        );
        let mut visited:HashSet<usize> = HashSet::with_capacity_and_hasher(
            self.nodes_len(), nohash::BuildNoHashHasher::default()
        );
        let mut queue = VecDeque::with_capacity(self.nodes_len());
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                break;
            }
            for next in self.next_nodes(current) {
                // insert returns false for visited nodes
                if visited.insert(next) {
                    predecessors.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        if !visited.contains(&end) {
            return None;
        }

        let mut path = vec![end];
        let mut current = end;
        while current != start {
            current = *predecessors.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

impl<A:Borrow<(usize,usize)>> FromIterator<A> for DirectedGraph {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size = match iter.size_hint() {
            (_,Some(higher)) => {higher},
            (lower,None) => {lower}
        };
        let mut new_graph = Self::with_capacity(size);
        for pair in iter {
            let (start,end) = pair.borrow();
            new_graph.push_pair_with_sizehint(*start, *end,size);
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

impl<T> From<T> for DirectedGraph
    where T:AsRef<[(usize,usize)]>
{
    fn from(value: T) -> Self {
        let mut new_graph = Self::with_capacity(value.as_ref().len());
        for (start,end) in value.as_ref() {
            new_graph.push_pair_with_sizehint(*start, *end,value.as_ref().len());
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

#[derive(Clone,Debug)]
pub struct UnDirectedGraph {
    edges_len:usize,
    adjacency_list:HashMap<usize,HashSet<usize>>
}

impl Default for UnDirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl UnDirectedGraph {
    pub fn edges_len(&self) -> usize {
        self.edges_len
    }
    pub fn nodes_len(&self) -> usize {
        self.adjacency_list.len()
    }
    pub fn is_empty(&self) -> bool {
        if self.nodes_len() == 0 {
            debug_assert!(self.edges_len() == 0);
            return true;
        }
        return false;
    }
    pub fn new() -> Self {
        Self {
            edges_len:0,
            adjacency_list:HashMap::with_hasher(
                nohash::BuildNoHashHasher::default()
            )
        }
    }
    pub fn with_capacity(capacity:usize) -> Self {
        Self {
            edges_len:0,
            adjacency_list:HashMap::with_capacity_and_hasher(
                capacity,
                nohash::BuildNoHashHasher::default())
        }
    }
    // only push node, not adding edges
    pub fn push_node<B:Borrow<usize>>(&mut self,node:B) {
        let node = node.borrow();
        if self.adjacency_list.contains_key(node) {
            return;
        }
        self.adjacency_list.insert(*node,HashSet::with_hasher(nohash::BuildNoHashHasher::default()));
    }
    pub fn push_edge<B:Borrow<(usize,usize)>>(&mut self,edge:B) {
        let (node1,node2) = edge.borrow();
        // insert returns false if node2 is already node1's neighbour
        let is_edge_new = self.adjacency_list.entry(*node1)
            .or_insert_with(|| HashSet::with_hasher(nohash::BuildNoHashHasher::default()))
            .insert(*node2);
        self.adjacency_list.entry(*node2)
            .or_insert_with(|| HashSet::with_hasher(nohash::BuildNoHashHasher::default()))
            .insert(*node1);
        if is_edge_new {
            self.edges_len += 1;
        }
    }
    pub fn neighbours(&self,node:usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency_list.get(&node).into_iter().flat_map(|adj| adj.iter().copied())
    }
    // every edge once, as (smaller,larger)
    pub fn edges(&self) -> Vec<(usize,usize)> {
        let mut edges:Vec<(usize,usize)> = self.adjacency_list.iter()
            .flat_map(|(node,adj)| adj.iter().filter(move |other| node <= *other).map(move |other| (*node,*other)))
            .collect();
        edges.sort_unstable();
        edges
    }
    pub fn shrink_to_fit(&mut self) {
        self.adjacency_list.shrink_to_fit();
        for v in self.adjacency_list.values_mut() {
            v.shrink_to_fit();
        }
    }
}

impl<T:AsRef<[(usize,usize)]>> From<T> for UnDirectedGraph {
    fn from(value: T) -> Self {
        let size_estimation = value.as_ref().len();
        let mut new_graph = Self::with_capacity(size_estimation);
        for edge in value.as_ref() {
            new_graph.push_edge(edge);
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

impl<B:Borrow<(usize,usize)>> FromIterator<B> for UnDirectedGraph {
    fn from_iter<T: IntoIterator<Item = B>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size_estimation = match iter.size_hint() {
            (_,Some(n)) => {n},
            (n,None) => {n}
        };
        let mut new_graph = Self::with_capacity(size_estimation);
        for b in iter {
            new_graph.push_edge(b.borrow());
        }
        new_graph.shrink_to_fit();
        new_graph
    }
}

#[cfg(test)]
mod tests{
    use rand::{Rng, RngCore};

    use super::{DirectedGraph, UnDirectedGraph};

    #[test]
    fn test_chain_path() {
        let mut nodes:Vec<usize> = vec![];
        let mut rng = rand::rng();
        let mut seen = std::collections::HashSet::new();
        while nodes.len() < 16 {
            let node = rng.next_u64() as usize;
            if seen.insert(node) {
                nodes.push(node);
            }
        }
        let mut edges:Vec<(usize,usize)> = vec![];
        for i in 0..nodes.len() - 1 {
            edges.push((nodes[i],nodes[i+1]))
        }
        let new_graph = DirectedGraph::from(&edges);
        let path = new_graph.bfs_path(nodes[0], nodes[nodes.len()-1]).unwrap();
        assert_eq!(path,nodes);
        // edges only go forward
        assert!(new_graph.bfs_path(nodes[nodes.len()-1], nodes[0]).is_none());
    }
    #[test]
    fn test_bfs_takes_shortcut() {
        let edges:[(usize,usize);6] = [(1,2),(2,3),(3,4),(4,5),(1,6),(6,5)];
        let graph:DirectedGraph = edges.into();
        assert_eq!(graph.bfs_path(1, 5).unwrap(),vec![1,6,5]);
        assert_eq!(graph.bfs_path(2, 5).unwrap(),vec![2,3,4,5]);
        assert_eq!(graph.bfs_path(3, 3).unwrap(),vec![3]);
        assert!(graph.bfs_path(1, 42).is_none());
    }
    #[test]
    fn test_duplicate_edges_count_once() {
        let mut graph = DirectedGraph::new();
        assert!(graph.push_pair(1, 2));
        assert!(!graph.push_pair(1, 2));
        assert!(graph.push_pair(2, 1));
        assert_eq!(graph.edges_len(),2);
        assert_eq!(graph.nodes_len(),2);
        assert!(graph.contains_edge(1, 2));
        assert!(!graph.contains_edge(1, 3));
        assert_eq!(graph.prev_nodes(2).collect::<Vec<_>>(),vec![1]);
    }
    #[test]
    fn test_new_undirected_graph() {
        let mut rng = rand::rng();
        let edge_len:usize = rng.random_range(1000..10000);
        let mut edges:std::collections::HashSet<(usize,usize)> = std::collections::HashSet::new();
        for _ in 0..edge_len {
            let (a,b) = (rng.random_range(0..114514),rng.random_range(0..114514));
            // (a,b) and (b,a) are the same undirected edge
            edges.insert((a.min(b),a.max(b)));
        }
        let isolated_nodes_len:usize = rng.random_range(100..1000);

        let mut new_graph:UnDirectedGraph = edges.iter().collect();
        for n in 114514..114514 + isolated_nodes_len {new_graph.push_node(n)};

        assert_eq!(new_graph.edges_len(),edges.len());
        assert_eq!(new_graph.edges().len(),edges.len());
    }
    #[test]
    fn test_undirected_edges_sorted() {
        let edges:[(usize,usize);3] = [(3,1),(1,3),(2,1)];
        let graph:UnDirectedGraph = edges.into();
        assert_eq!(graph.edges(),vec![(1,2),(1,3)]);
        let mut neighbours:Vec<usize> = graph.neighbours(1).collect();
        neighbours.sort();
        assert_eq!(neighbours,vec![2,3]);
        assert!(!graph.is_empty());
    }
}
