// src/fixtures.rs

/// Trimmed-down copy of the winners article: a key table first, then the
/// results table with a cancelled year, a points year, a bad margin and a
/// stripped title.
pub const WINNERS_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>List of Tour de France general classification winners</title></head>
<body>
<table class="wikitable">
<tr>
<th>Symbol</th>
<th>Meaning</th>
</tr>
<tr>
<td>[B]</td>
<td>Title stripped</td>
</tr>
</table>
<table class="wikitable sortable plainrowheaders">
<tbody>
<tr>
<th scope="col">Year</th>
<th scope="col">Country</th>
<th scope="col">Cyclist</th>
<th scope="col">Sponsor/Team</th>
<th scope="col">Distance</th>
<th scope="col">Time/Points</th>
<th scope="col">Margin</th>
<th scope="col">Stage wins</th>
<th scope="col">Stages in lead</th>
</tr>
<tr>
<td>1903</td>
<td>&nbsp;France</td>
<td>Maurice Garin</td>
<td>La Française</td>
<td>2,428&nbsp;km (1,509&nbsp;mi)</td>
<td>94h 33' 14"</td>
<td>+ 2h 59' 21"</td>
<td>3</td>
<td>6</td>
</tr>
<tr>
<td>1905</td>
<td>&nbsp;France</td>
<td>Louis Trousselier</td>
<td>Peugeot–Wolber</td>
<td>2,994&nbsp;km (1,860&nbsp;mi)</td>
<td>35 points</td>
<td>+ 26 points</td>
<td>5</td>
<td>10</td>
</tr>
<tr>
<td>1915</td>
<td colspan="8">Not contested due to World War I</td>
</tr>
<tr>
<td>1929</td>
<td>&nbsp;Belgium</td>
<td>Maurice De Waele</td>
<td>Alcyon–Dunlop</td>
<td>5,286&nbsp;km (3,285&nbsp;mi)</td>
<td>186h 39' 15"</td>
<td>+ 44'23"</td>
<td>1</td>
<td>16</td>
</tr>
<tr>
<td>1947</td>
<td>&nbsp;France</td>
<td>Jean Robic</td>
<td>Ouest</td>
<td>4,642&nbsp;km (2,884&nbsp;mi)</td>
<td>148h 11' 25"</td>
<td>+ 3 '58"</td>
<td>3</td>
<td>1</td>
</tr>
<tr>
<td>1989</td>
<td>&nbsp;United States</td>
<td>Greg LeMond</td>
<td>AD Renting–W-Cup–Bottecchia</td>
<td>3,285&nbsp;km (2,041&nbsp;mi)</td>
<td>87h 38' 35"</td>
<td>+ 8"</td>
<td>3</td>
<td>8</td>
</tr>
<tr>
<td>1999<sup>[B]</sup></td>
<td>&nbsp;United States</td>
<td>Lance Armstrong</td>
<td>U.S. Postal Service</td>
<td>3,687&nbsp;km (2,291&nbsp;mi)</td>
<td>91h 32' 16"</td>
<td>+ 7' 37"</td>
<td>4</td>
<td>15</td>
</tr>
</tbody>
</table>
</body>
</html>
"##;
