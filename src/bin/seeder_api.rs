#[actix_web::main]
async fn main() -> std::io::Result<()> {
    ppdb_seeder::run().await
}
