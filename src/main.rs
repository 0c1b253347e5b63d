use docopt::Docopt;
use itertools::Itertools;
use log::{info, warn};
use maze_trunk::{
    grid::Grid,
    units::{Height, Width},
    MazeError,
    MazeSession,
    Solution,
    SolveStrategy,
};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Trunk

Usage:
    maze_trunk_driver -h | --help
    maze_trunk_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--save-edges=<path>]
    maze_trunk_driver solve (bfs|prune) [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--save-edges=<path>] [--solution-out=<path>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 10].
    --grid-height=<h>      The grid height in a w*h grid [default: 10].
    --seed=<s>             Seed the random number generator to reproduce a maze.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --solution-out=<path>  Output file path for the solution cells, one 'x y' pair per line. Printed to stdout if not given.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_save_edges: String,
    flag_solution_out: String,
    cmd_solve: bool,
    cmd_bfs: bool,
    cmd_prune: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Maze(::maze_trunk::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut rng: Box<dyn RngCore> = match args.flag_seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let mut session = MazeSession::new();
    let episode = session.generate_with_rng(Width(width), Height(height), &mut *rng)
        .chain_err(|| format!("Failed to generate a {}x{} maze", width, height))?;
    info!("Maze start {} ({:?} wall), end {} ({:?} wall)",
          episode.start(),
          episode.entrance_side(),
          episode.end(),
          episode.exit_side());

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(episode.grid(), &args.flag_save_edges)?;
    }

    if args.cmd_solve {
        let strategy = match (args.cmd_bfs, args.cmd_prune) {
            (_, true) => SolveStrategy::Trunk,
            _ => SolveStrategy::ShortestPath,
        };

        match session.solve(strategy) {
            Ok(solution) => write_solution(&solution, &args.flag_solution_out)?,
            Err(MazeError::NoActiveMaze) => warn!("No maze to solve"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn write_solution(solution: &Solution, file_path: &str) -> Result<()> {
    let lines = solution.coordinates()
        .iter()
        .map(|coord| format!("{} {}", coord.x, coord.y))
        .join("\n");

    if file_path.is_empty() {
        println!("{}", lines);
    } else {
        write_text_to_file(&format!("{}\n", lines), file_path)
            .chain_err(|| format!("Failed to write maze solution to text file {}", file_path))?;
        info!("Wrote {} solution cells to {}", solution.len(), file_path);
    }
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let graph = maze_grid.passage_graph();
    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("Wrote {} passages to {}", graph.edge_count(), file_path);

    Ok(())
}
