quantity!(GigajoulePrice, "$/GJ");
